use super::*;

fn scope() -> ClassScope {
    ClassScope::new("TestWithJUnitAssertions")
        .with_constant("DEFAULT_EXPLANATION", Expr::Str("JUnit explanation".to_string()))
        .with_constant(
            "DEFAULT_SUPPLIER",
            Expr::Lambda(Some(Box::new(Expr::Name(
                "TestWithJUnitAssertions.DEFAULT_EXPLANATION".to_string(),
            )))),
        )
        .with_constant("LOOP", Expr::Name("LOOP".to_string()))
}

fn format_call(fmt: Expr) -> Expr {
    Expr::Call(Invocation::new(
        Receiver::Named("String".to_string()),
        "format",
        vec![fmt, Expr::Str("explanation".to_string())],
    ))
}

#[test]
fn fold_returns_string_literal() {
    assert_eq!(scope().fold(&Expr::Str("msg".to_string())).as_deref(), Some("msg"));
}

#[test]
fn fold_resolves_constant_field() {
    let expr = Expr::Name("DEFAULT_EXPLANATION".to_string());
    assert_eq!(scope().fold(&expr).as_deref(), Some("JUnit explanation"));
}

#[test]
fn fold_resolves_constant_qualified_by_own_class() {
    let expr = Expr::Name("TestWithJUnitAssertions.DEFAULT_EXPLANATION".to_string());
    assert_eq!(scope().fold(&expr).as_deref(), Some("JUnit explanation"));
}

#[test]
fn fold_rejects_constant_of_other_class() {
    let expr = Expr::Name("Other.DEFAULT_EXPLANATION".to_string());
    assert_eq!(scope().fold(&expr), None);
}

#[test]
fn fold_resolves_supplier_constant_through_lambda() {
    let expr = Expr::Name("DEFAULT_SUPPLIER".to_string());
    assert_eq!(scope().fold(&expr).as_deref(), Some("JUnit explanation"));
}

#[test]
fn fold_uses_format_string_of_string_format() {
    let expr = format_call(Expr::Str("JUnit %s".to_string()));
    assert_eq!(scope().fold(&expr).as_deref(), Some("JUnit %s"));
}

#[test]
fn fold_concatenates_foldable_operands() {
    let expr = Expr::Concat(vec![
        Expr::Str("expected ".to_string()),
        Expr::Number("3".to_string()),
        Expr::Name("DEFAULT_EXPLANATION".to_string()),
    ]);
    assert_eq!(
        scope().fold(&expr).as_deref(),
        Some("expected 3JUnit explanation")
    );
}

#[test]
fn fold_gives_up_on_local_variables() {
    assert_eq!(scope().fold(&Expr::Name("message".to_string())), None);
}

#[test]
fn fold_gives_up_on_self_referencing_constants() {
    assert_eq!(scope().fold(&Expr::Name("LOOP".to_string())), None);
}

#[test]
fn fold_gives_up_on_block_lambdas_and_calls() {
    assert_eq!(scope().fold(&Expr::Lambda(None)), None);
    let call = Expr::Call(Invocation::new(Receiver::Unqualified, "compute", vec![]));
    assert_eq!(scope().fold(&call), None);
}

#[test]
fn imports_statically_matches_member_and_wildcard() {
    let scope = ClassScope::new("X")
        .with_static_import("org.junit.jupiter.api.Assertions.assertTrue")
        .with_static_import("org.hamcrest.MatcherAssert.*");
    assert!(scope.imports_statically("Assertions", "assertTrue"));
    assert!(!scope.imports_statically("Assertions", "assertFalse"));
    assert!(scope.imports_statically("MatcherAssert", "assertThat"));
    assert!(!scope.imports_statically("Mockito", "mock"));
}

#[test]
fn receiver_simple_name_takes_last_segment() {
    let receiver = Receiver::Named("org.junit.jupiter.api.Assertions".to_string());
    assert_eq!(receiver.simple_name(), Some("Assertions"));
    assert_eq!(Receiver::Computed.simple_name(), None);
}

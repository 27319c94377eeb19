use super::*;
use crate::model::Assertion;

fn messages(rule: &dyn Rule) -> Vec<String> {
    rule.complaints().into_iter().map(|c| c.message).collect()
}

// ===== RuleAssertionMessage =====

#[test]
fn case_without_assertions_complains_once() {
    let class = TestClass::fake();
    let case = TestCase::fake("removesItem").with_assertions(Vec::new());
    assert_eq!(
        messages(&RuleAssertionMessage::new(&class, &case)),
        vec!["no assertion messages"]
    );
}

#[test]
fn explained_assertions_pass() {
    let class = TestClass::fake();
    let case = TestCase::fake("removesItem").with_assertions(vec![
        Assertion::new("assertEquals", Some("cart is empty".to_string())),
        Assertion::new("assertThat", Some("unknown at static time".to_string())),
    ]);
    assert!(RuleAssertionMessage::new(&class, &case).complaints().is_empty());
}

#[test]
fn each_unexplained_assertion_complains() {
    let class = TestClass::fake();
    let case = TestCase::fake("removesItem").with_assertions(vec![
        Assertion::new("assertEquals", Some("ok".to_string())).at_line(10),
        Assertion::new("assertTrue", None).at_line(11),
        Assertion::new("assertNull", None).at_line(14),
    ]);
    assert_eq!(
        messages(&RuleAssertionMessage::new(&class, &case)),
        vec![
            "assertion without message at line 11",
            "assertion without message at line 14"
        ]
    );
}

// ===== RuleLineHitter =====

#[test]
fn line_hitters_are_reported_per_assertion() {
    let class = TestClass::fake();
    let case = TestCase::fake("removesItem").with_assertions(vec![
        Assertion::new("assertTrue", Some("m".to_string()))
            .line_hitter(true)
            .at_line(7),
        Assertion::new("assertEquals", Some("m".to_string())).at_line(8),
    ]);
    let complaints = RuleLineHitter::new(&class, &case).complaints();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].message, "line hitter assertion at line 7");
    assert_eq!(complaints[0].rule, RuleLineHitter::ID);
}

#[test]
fn no_assertions_means_no_line_hitters() {
    let class = TestClass::fake();
    let case = TestCase::fake("removesItem").with_assertions(Vec::new());
    assert!(RuleLineHitter::new(&class, &case).complaints().is_empty());
}

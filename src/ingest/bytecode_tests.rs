use std::path::Path;

use super::*;
use crate::ingest::test_fixtures::ClassFileBuilder;

fn parse(bytes: &[u8]) -> CompiledClass {
    parse_bytes(bytes, Path::new("target/test-classes/RuleName.class")).unwrap()
}

#[test]
fn reads_name_and_hierarchy() {
    let bytes = ClassFileBuilder::new("com/example/RuleNameTest")
        .extends("com/example/BaseTest")
        .implements("org/junit/jupiter/api/extension/ExecutionCondition")
        .build();

    let class = parse(&bytes);

    assert_eq!(class.fqn, "com.example.RuleNameTest");
    assert_eq!(class.simple_name(), "RuleNameTest");
    assert_eq!(class.package(), "com.example");
    assert_eq!(class.super_name.as_deref(), Some("com.example.BaseTest"));
    assert_eq!(
        class.interfaces,
        vec!["org.junit.jupiter.api.extension.ExecutionCondition".to_string()]
    );
}

#[test]
fn reads_static_and_instance_fields() {
    let bytes = ClassFileBuilder::new("RuleName")
        .field(0x0019, "PREFIX", "Ljava/lang/String;", &[])
        .field(0x0012, "name", "Ljava/lang/String;", &["Ljavax/annotation/Nullable;"])
        .field(0x1018, "$assertionsDisabled", "Z", &[])
        .build();

    let class = parse(&bytes);

    let names: Vec<_> = class.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["PREFIX", "name"]);
    assert!(class.fields[0].is_static);
    assert!(!class.fields[1].is_static);
    assert_eq!(class.fields[0].type_name, "java.lang.String");
    assert!(class.fields[1].has_annotation("Nullable"));
}

#[test]
fn reads_method_annotations() {
    let bytes = ClassFileBuilder::new("FooTest")
        .method("<init>", &[])
        .method("checksFoo", &["Lorg/junit/jupiter/api/Test;"])
        .build();

    let class = parse(&bytes);

    assert_eq!(class.methods.len(), 2);
    assert_eq!(class.methods[1].name, "checksFoo");
    assert_eq!(class.methods[1].annotations, vec!["Test".to_string()]);
}

#[test]
fn flags_interfaces_and_auxiliary_classes() {
    let interface = parse(&ClassFileBuilder::new("Api").access(0x0601).build());
    assert!(!interface.is_type_declaration());

    let inner = parse(&ClassFileBuilder::new("FooTest$Nested").build());
    assert!(inner.is_auxiliary());

    let info = parse(&ClassFileBuilder::new("com/example/package-info").build());
    assert!(info.is_auxiliary());
}

#[test]
fn rejects_bad_magic() {
    let result = parse_bytes(b"\x00\x01\x02\x03rest", Path::new("x.class"));
    assert_eq!(result.unwrap_err(), ClassFormatError::BadMagic(0x0001_0203));
}

#[test]
fn rejects_truncated_file() {
    let bytes = ClassFileBuilder::new("FooTest").build();
    let result = parse_bytes(&bytes[..bytes.len() / 2], Path::new("x.class"));
    assert!(result.is_err());
}

#[test]
fn parse_file_wraps_format_errors() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("Broken.class");
    std::fs::write(&path, b"not a class").unwrap();

    let err = parse_file(&path).unwrap_err();

    assert!(matches!(err, TestcopError::Parse { .. }));
    assert!(err.to_string().contains("Broken.class"));
}

#[test]
fn descriptor_types_are_readable() {
    assert_eq!(descriptor_type("I"), "int");
    assert_eq!(descriptor_type("[[J"), "long[][]");
    assert_eq!(descriptor_type("[Ljava/util/Map$Entry;"), "java.util.Map.Entry[]");
}

use std::path::PathBuf;

use super::*;
use crate::engine::Complaint;
use crate::ingest::ParseFailure;
use crate::model::{TestCase, TestClass};

#[test]
fn json_payload_has_summary_complaints_and_diagnostics() {
    let class = TestClass::fake_named("CartTest");
    let case = TestCase::fake("addItem").with_line(7);
    let report = Report {
        complaints: vec![Complaint::on_case(
            "RulePresentTense",
            &class,
            &case,
            "the test name has to be written using present tense",
        )],
        diagnostics: vec![ParseFailure::new("Broken.class", "bad magic")],
    };

    let output = JsonFormatter::new().format(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["summary"]["complaints"], 1);
    assert_eq!(parsed["summary"]["diagnostics"], 1);
    let complaint = &parsed["complaints"][0];
    assert_eq!(complaint["rule"], "RulePresentTense");
    assert_eq!(complaint["path"], "src/test/java/CartTest.java");
    assert_eq!(complaint["line"], 7);
    assert_eq!(complaint["class"], "CartTest");
    assert_eq!(complaint["method"], "addItem");
    assert_eq!(parsed["diagnostics"][0]["reason"], "bad magic");
}

#[test]
fn class_complaints_omit_method_and_line() {
    let class = TestClass::fake();
    let report = Report {
        complaints: vec![Complaint::on_class("RuleNullableAnnotation", &class, "m")],
        diagnostics: Vec::new(),
    };

    let output = JsonFormatter::new().format(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    let complaint = parsed["complaints"][0].as_object().unwrap();
    assert!(!complaint.contains_key("method"));
    assert!(!complaint.contains_key("line"));
}

#[test]
fn paths_are_relative_to_project_root() {
    let report = Report {
        complaints: Vec::new(),
        diagnostics: vec![ParseFailure::new("/work/target/A.class", "truncated")],
    };

    let output = JsonFormatter::new()
        .with_project_root(Some(PathBuf::from("/work")))
        .format(&report)
        .unwrap();

    assert!(output.contains("\"target/A.class\""));
}

use indexmap::IndexSet;

use super::*;
use crate::model::{TestCase, TestClass};
use crate::rules::RulePresentTense;

fn set(values: &[&str]) -> IndexSet<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn unsuppressed_rule_passes_complaints_through() {
    let class = TestClass::fake();
    let case = TestCase::fake("removeItem");
    let none = Suppressions::default();
    let rule = RuleSuppressed::new(
        Box::new(RulePresentTense::new(&class, &case)),
        set(&["RuleNotSpam"]),
        &none,
    );
    assert_eq!(rule.id(), RulePresentTense::ID);
    assert_eq!(rule.complaints().len(), 1);
}

#[test]
fn target_suppression_silences_rule() {
    let class = TestClass::fake();
    let case = TestCase::fake("removeItem");
    let none = Suppressions::default();
    for value in ["RulePresentTense", "JTCOP.RulePresentTense"] {
        let rule = RuleSuppressed::new(
            Box::new(RulePresentTense::new(&class, &case)),
            set(&[value]),
            &none,
        );
        assert!(rule.complaints().is_empty(), "{value}");
    }
}

#[test]
fn global_suppression_silences_rule() {
    let class = TestClass::fake();
    let case = TestCase::fake("removeItem");
    let global = Suppressions::new(["RulePresentTense"]);
    let rule = RuleSuppressed::new(
        Box::new(RulePresentTense::new(&class, &case)),
        IndexSet::new(),
        &global,
    );
    assert!(rule.complaints().is_empty());
}

#[test]
fn matching_is_case_sensitive() {
    let class = TestClass::fake();
    let case = TestCase::fake("removeItem");
    let none = Suppressions::default();
    let rule = RuleSuppressed::new(
        Box::new(RulePresentTense::new(&class, &case)),
        set(&["rulepresenttense", "all"]),
        &none,
    );
    assert_eq!(rule.complaints().len(), 1);
}

//! Integration tests for `.testcop.toml` handling.

mod common;

use common::{NOISY_TEST, TestFixture};
use predicates::prelude::*;

#[test]
fn local_config_fail_on_none() {
    let fixture = TestFixture::new();
    fixture.create_test_source("com/example/OrderTest.java", NOISY_TEST);
    fixture.create_config("fail_on = \"none\"\n");

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(RuleLineHitter)"));
}

#[test]
fn cli_fail_on_overrides_config() {
    let fixture = TestFixture::new();
    fixture.create_test_source("com/example/OrderTest.java", NOISY_TEST);
    fixture.create_config("fail_on = \"none\"\n");

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--fail-on", "any"])
        .assert()
        .code(1);
}

#[test]
fn local_config_rules_and_suppressions() {
    let fixture = TestFixture::new();
    fixture.create_test_source("com/example/OrderTest.java", NOISY_TEST);
    fixture.create_config(
        r#"
rules = ["RuleLineHitter", "RuleAssertionMessage"]
suppressions = ["JTCOP.RuleLineHitter"]
"#,
    );

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(RuleAssertionMessage)"))
        .stdout(predicate::str::contains("(RuleLineHitter)").not())
        .stdout(predicate::str::contains("(RulePresentTense)").not());
}

#[test]
fn explicit_config_path() {
    let fixture = TestFixture::new();
    fixture.create_test_source("com/example/OrderTest.java", NOISY_TEST);
    fixture.create_file("conf/strict.toml", "rules = [\"RuleLineHitter\"]\n");

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never", "--config", "conf/strict.toml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary: 1 complaint"));
}

#[test]
fn exclude_pattern_skips_sources() {
    let fixture = TestFixture::new();
    fixture.create_test_source("com/example/OrderTest.java", NOISY_TEST);
    fixture.create_config("exclude = [\"**/OrderTest.java\"]\n");

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 0 complaints"));
}

// =============================================================================
// Invalid Configuration
// =============================================================================

#[test]
fn unknown_key_is_a_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config("max_lines = 10\n");

    testcop!()
        .current_dir(fixture.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".testcop.toml"));
}

#[test]
fn invalid_glob_is_a_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config("exclude = [\"[unclosed\"]\n");

    testcop!()
        .current_dir(fixture.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn unknown_rule_in_config_is_a_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config("rules = [\"RuleMadeUp\"]\n");

    testcop!()
        .current_dir(fixture.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RuleMadeUp"));
}

#[test]
fn missing_config_path_is_a_config_error() {
    let fixture = TestFixture::new();

    testcop!()
        .current_dir(fixture.path())
        .args(["check", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.toml"));
}

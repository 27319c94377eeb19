//! Integration tests for the command-line surface outside `check`.

mod common;

use common::TestFixture;
use predicates::prelude::*;

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_lists_subcommands() {
    testcop!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("model"));
}

#[test]
fn version_is_printed() {
    testcop!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    testcop!().assert().failure().code(2);
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn rules_lists_every_rule() {
    testcop!()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("RuleNotSpam"))
        .stdout(predicate::str::contains("RulePresentTense"))
        .stdout(predicate::str::contains("RuleTestCaseContainsMockery"))
        .stdout(predicate::str::contains("RuleNullableAnnotation"));
}

// =============================================================================
// Model
// =============================================================================

#[test]
fn model_fetch_caches_bundled_model() {
    let fixture = TestFixture::new();

    testcop!()
        .current_dir(fixture.path())
        .args(["model", "fetch", "--model-path", "cache/pos.bin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("POS model ready"));

    assert!(fixture.path().join("cache/pos.bin").is_file());
}

#[test]
fn model_fetch_offline_without_cache_fails() {
    let fixture = TestFixture::new();

    testcop!()
        .current_dir(fixture.path())
        .args([
            "model",
            "fetch",
            "--model-url",
            "https://models.invalid/pos.bin",
            "--model-path",
            "cache/pos.bin",
            "--offline",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("POS model unavailable"));
}

#[test]
fn model_fetch_rejects_non_http_url() {
    let fixture = TestFixture::new();

    testcop!()
        .current_dir(fixture.path())
        .args(["model", "fetch", "--model-url", "ftp://models.example/pos.bin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--model-url"));
}

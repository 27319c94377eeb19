use super::*;

#[test]
fn empty_config_runs_every_rule() {
    let options = Config::default().to_options();
    assert_eq!(options.rules, RuleSelection::All);
    assert_eq!(options.fail_on, FailOn::Any);
    assert!(options.suppressions.is_empty());
    assert!(options.model_url.is_none());
}

#[test]
fn parses_full_config() {
    let config: Config = toml::from_str(
        r#"
rules = ["RulePresentTense", "RuleNotSpam"]
fail_on = "none"
suppressions = ["RuleLineHitter"]
exclude = ["**/generated/**"]
allowed_parents = ["AbstractIT"]

[model]
path = "/tmp/pos.bin"
url = "https://example.com/pos.bin"
"#,
    )
    .unwrap();

    let options = config.to_options();
    assert_eq!(
        options.rules,
        RuleSelection::Only(
            ["RulePresentTense".to_string(), "RuleNotSpam".to_string()].into()
        )
    );
    assert_eq!(options.fail_on, FailOn::None);
    assert!(options.suppressions.contains("RuleLineHitter"));
    assert_eq!(options.exclude, vec!["**/generated/**"]);
    assert!(options.allowed_parents.contains("AbstractIT"));
    assert_eq!(options.model_path, Some(PathBuf::from("/tmp/pos.bin")));
    assert_eq!(options.model_url.as_deref(), Some("https://example.com/pos.bin"));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(toml::from_str::<Config>("colour = true").is_err());
    assert!(toml::from_str::<Config>("[model]\nmirror = \"x\"").is_err());
}

#[test]
fn fail_on_values_are_lowercase() {
    assert!(toml::from_str::<Config>("fail_on = \"Any\"").is_err());
    let config: Config = toml::from_str("fail_on = \"any\"").unwrap();
    assert_eq!(config.fail_on, FailOn::Any);
}

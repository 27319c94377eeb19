//! Configuration semantic validation.
//!
//! Runs after parsing: rule identifiers must be registered, globs must
//! compile and the model URL must be remote.

use crate::config::Config;
use crate::pos::is_remote_url;
use crate::rules;
use crate::suppression::ALIAS_PREFIX;
use crate::{Result, TestcopError};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a rule identifier is malformed or unknown, an exclude
/// glob does not compile, or the model URL is not `http(s)://`.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_rule_ids(config)?;
    validate_glob_patterns(config)?;
    validate_model_section(config)?;
    Ok(())
}

fn validate_rule_ids(config: &Config) -> Result<()> {
    for id in config.rules.iter().flatten() {
        check_rule_id("rules", id)?;
        if rules::find(id).is_none() {
            return Err(TestcopError::Config(format!("rules: unknown rule '{id}'")));
        }
    }
    for value in &config.suppressions {
        let id = value.strip_prefix(ALIAS_PREFIX).unwrap_or(value);
        check_rule_id("suppressions", id)?;
    }
    Ok(())
}

fn check_rule_id(section: &str, id: &str) -> Result<()> {
    if rules::is_valid_id(id) {
        Ok(())
    } else {
        Err(TestcopError::Config(format!(
            "{section}: '{id}' is not a rule identifier (expected e.g. RuleNotSpam)"
        )))
    }
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    for pattern in &config.exclude {
        globset::Glob::new(pattern).map_err(|e| TestcopError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

fn validate_model_section(config: &Config) -> Result<()> {
    if let Some(url) = &config.model.url
        && !is_remote_url(url)
    {
        return Err(TestcopError::Config(format!(
            "model.url must start with http:// or https://, got '{url}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;

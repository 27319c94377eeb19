use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::engine::{AnalysisOptions, FailOn, RuleSelection};

/// Contents of `.testcop.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rules to run; every registered rule when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,

    #[serde(default)]
    pub fail_on: FailOn,

    /// Rules suppressed for every class and case.
    #[serde(default)]
    pub suppressions: Vec<String>,

    /// Globs of source and class files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Parent classes test classes may extend.
    #[serde(default)]
    pub allowed_parents: Vec<String>,

    #[serde(default)]
    pub model: ModelConfig,
}

/// Where the POS model comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Cache file for the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Download URL; the bundled model is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Config {
    /// Analysis options described by this configuration.
    #[must_use]
    pub fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            fail_on: self.fail_on,
            rules: self.rules.as_ref().map_or(RuleSelection::All, |ids| {
                RuleSelection::Only(ids.iter().cloned().collect())
            }),
            suppressions: self.suppressions.iter().cloned().collect(),
            model_path: self.model.path.clone(),
            model_url: self.model.url.clone(),
            offline: false,
            exclude: self.exclude.clone(),
            allowed_parents: self.allowed_parents.iter().cloned().collect::<IndexSet<_>>(),
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

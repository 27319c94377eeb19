//! Runs the registered rules over an ingested project.

mod complaint;

pub use complaint::Complaint;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TestcopError};
use crate::ingest::{self, ParseFailure};
use crate::model::{Project, TestClass};
use crate::pos::{BundledSource, CachedSource, InternetSource, ModelSource, PosModel};
use crate::rules::{self, Rule, RuleContext, RuleDescriptor, RuleSuppressed, Scope};
use crate::state;
use crate::suppression::Suppressions;
use crate::{EXIT_COMPLAINTS, EXIT_SUCCESS};

/// When complaints make the run fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    Any,
    None,
}

/// Which registered rules run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RuleSelection {
    #[default]
    All,
    Only(IndexSet<String>),
}

impl RuleSelection {
    #[must_use]
    pub fn includes(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(id),
        }
    }

    /// Resolve the selection against the registry.
    ///
    /// # Errors
    /// Returns a configuration error naming the first unknown identifier.
    pub fn resolve(&self) -> Result<Vec<&'static RuleDescriptor>> {
        if let Self::Only(ids) = self
            && let Some(unknown) = ids.iter().find(|id| rules::find(id).is_none())
        {
            return Err(TestcopError::Config(format!("Unknown rule: {unknown}")));
        }
        Ok(rules::registry()
            .iter()
            .filter(|descriptor| self.includes(descriptor.id))
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub fail_on: FailOn,
    pub rules: RuleSelection,
    /// Rule identifiers suppressed for every target.
    pub suppressions: IndexSet<String>,
    /// Where the POS model is cached.
    pub model_path: Option<PathBuf>,
    /// Download the POS model from here instead of using the bundled one.
    pub model_url: Option<String>,
    /// Never download the POS model; only a cached copy is used.
    pub offline: bool,
    /// Globs of source and class files to skip.
    pub exclude: Vec<String>,
    /// Parent classes allowed on top of `Object`.
    pub allowed_parents: IndexSet<String>,
}

/// Outcome of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub complaints: Vec<Complaint>,
    pub diagnostics: Vec<ParseFailure>,
}

impl Report {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.complaints.is_empty()
    }

    #[must_use]
    pub const fn exit_code(&self, fail_on: FailOn) -> i32 {
        match fail_on {
            FailOn::Any if !self.is_clean() => EXIT_COMPLAINTS,
            FailOn::Any | FailOn::None => EXIT_SUCCESS,
        }
    }
}

/// Ingest both roots and run the selected rules.
///
/// # Errors
/// Returns an error when a root is missing or unreadable, or when the
/// options name an unknown rule. Problems with single files end up in
/// [`Report::diagnostics`].
pub fn analyze(sources: &Path, classes: &Path, options: &AnalysisOptions) -> Result<Report> {
    let selected = options.rules.resolve()?;
    let ingested = ingest::ingest(sources, classes, &options.exclude)?;
    info!(
        classes = ingested.project.test_classes.len(),
        rules = selected.len(),
        "analyzing test classes"
    );

    let context = RuleContext::new(Arc::new(PosModel::new(model_source(options))))
        .with_allowed_parents(options.allowed_parents.iter().cloned());
    let suppressions = Suppressions::new(options.suppressions.iter().cloned());

    Ok(Report {
        complaints: evaluate(&ingested.project, &selected, &context, &suppressions),
        diagnostics: ingested.diagnostics,
    })
}

/// Run `rules` over every test class of `project`.
///
/// Complaints come back sorted and free of duplicates.
#[must_use]
pub fn evaluate(
    project: &Project,
    rules: &[&RuleDescriptor],
    context: &RuleContext,
    suppressions: &Suppressions,
) -> Vec<Complaint> {
    let mut complaints: Vec<Complaint> = project
        .test_classes
        .par_iter()
        .flat_map_iter(|class| class_complaints(class, rules, context, suppressions))
        .collect();
    complaints.sort();
    complaints.dedup();
    debug!(count = complaints.len(), "rules evaluated");
    complaints
}

fn class_complaints(
    class: &TestClass,
    rules: &[&RuleDescriptor],
    context: &RuleContext,
    suppressions: &Suppressions,
) -> Vec<Complaint> {
    let mut bound: Vec<RuleSuppressed<'_>> = Vec::new();
    for descriptor in rules {
        match descriptor.scope() {
            Scope::Class => {
                if let Some(rule) = descriptor.for_class(class, context) {
                    bound.push(RuleSuppressed::new(
                        rule,
                        class.suppressed().clone(),
                        suppressions,
                    ));
                }
            }
            Scope::Case => {
                for case in class.cases() {
                    if let Some(rule) = descriptor.for_case(class, case, context) {
                        bound.push(RuleSuppressed::new(rule, case.suppressed(), suppressions));
                    }
                }
            }
        }
    }
    bound.iter().flat_map(Rule::complaints).collect()
}

/// Where the POS model comes from for these options.
///
/// Without a URL the bundled model is used, cached at `model_path` when one
/// is given. With a URL the download is cached at `model_path` or in the
/// platform cache directory; offline runs only read that cache.
#[must_use]
pub fn model_source(options: &AnalysisOptions) -> Box<dyn ModelSource> {
    let Some(url) = options.model_url.as_deref() else {
        return match &options.model_path {
            Some(path) => Box::new(CachedSource::new(BundledSource, path)),
            None => Box::new(BundledSource),
        };
    };

    let inner: Box<dyn ModelSource> = if options.offline {
        Box::new(OfflineSource {
            url: url.to_string(),
        })
    } else {
        Box::new(InternetSource::new(url))
    };
    let path = options
        .model_path
        .clone()
        .or_else(|| state::default_model_path(Some(url)));
    match path {
        Some(path) => Box::new(CachedSource::new(inner, path)),
        None => inner,
    }
}

/// Stands in for a download when the network must not be used.
struct OfflineSource {
    url: String,
}

impl ModelSource for OfflineSource {
    fn bytes(&self) -> Result<Vec<u8>> {
        Err(TestcopError::ModelUnavailable(format!(
            "offline and {} is not cached",
            self.url
        )))
    }

    fn describe(&self) -> String {
        format!("{} (offline)", self.url)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

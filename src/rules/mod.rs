//! Rule library.
//!
//! A rule is bound to its target (a class, or a case of a class) when it is
//! constructed and reports complaints on demand. Rules never fail: problems
//! such as an unavailable POS model surface as complaints.

mod assertion;
mod naming;
mod registry;
mod structure;
mod suppressed;

pub use assertion::{RuleAssertionMessage, RuleLineHitter};
pub use naming::{
    RuleAllTestsInPresentSimple, RuleNotCamelCase, RuleNotContainsTestWord, RuleNotSpam,
    RulePresentSimpleMl, RulePresentTense,
};
pub use registry::{RuleDescriptor, Scope, find, is_valid_id, registry};
pub use structure::{
    RuleCorrectTestCaseDirectory, RuleInheritanceInTests, RuleNullableAnnotation,
    RuleTestCaseContainsMockery,
};
pub use suppressed::RuleSuppressed;

use std::sync::Arc;

use indexmap::IndexSet;

use crate::engine::Complaint;
use crate::pos::{BundledSource, PosModel};

/// Parent classes test classes may extend without a complaint.
pub const DEFAULT_ALLOWED_PARENTS: [&str; 2] = ["Object", "java.lang.Object"];

pub trait Rule: Send + Sync {
    /// Stable identifier used in configuration and `@SuppressWarnings`.
    fn id(&self) -> &'static str;

    /// Complaints about the bound target; empty when it conforms.
    fn complaints(&self) -> Vec<Complaint>;
}

/// What rules of one invocation share.
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub model: Arc<PosModel>,
    pub allowed_parents: IndexSet<String>,
}

impl RuleContext {
    #[must_use]
    pub fn new(model: Arc<PosModel>) -> Self {
        Self {
            model,
            allowed_parents: DEFAULT_ALLOWED_PARENTS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Allow more parents on top of the defaults.
    #[must_use]
    pub fn with_allowed_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_parents
            .extend(parents.into_iter().map(Into::into));
        self
    }

    /// Whether `parent` (qualified or simple) is allowed.
    #[must_use]
    pub fn allows_parent(&self, parent: &str) -> bool {
        let simple = parent.rsplit('.').next().unwrap_or(parent);
        self.allowed_parents.contains(parent) || self.allowed_parents.contains(simple)
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new(Arc::new(PosModel::new(BundledSource)))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

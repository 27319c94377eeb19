use indexmap::IndexSet;

use super::Rule;
use crate::engine::Complaint;
use crate::suppression::Suppressions;

/// Silences `inner` when its identifier is in the target's effective
/// suppression set or in the global suppressions.
pub struct RuleSuppressed<'a> {
    inner: Box<dyn Rule + 'a>,
    target: IndexSet<String>,
    suppressions: &'a Suppressions,
}

impl<'a> RuleSuppressed<'a> {
    #[must_use]
    pub fn new(
        inner: Box<dyn Rule + 'a>,
        target: IndexSet<String>,
        suppressions: &'a Suppressions,
    ) -> Self {
        Self {
            inner,
            target,
            suppressions,
        }
    }
}

impl Rule for RuleSuppressed<'_> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn complaints(&self) -> Vec<Complaint> {
        if self.suppressions.is_suppressed(self.inner.id(), &self.target) {
            Vec::new()
        } else {
            self.inner.complaints()
        }
    }
}

#[cfg(test)]
#[path = "suppressed_tests.rs"]
mod tests;

//! `@SuppressWarnings` resolution.
//!
//! Effective suppressions of a target are the union of the values written on
//! the target and on its enclosing scopes plus the suppressions given in the
//! analysis options. Values match rule identifiers exactly; the
//! `JTCOP.`-prefixed spelling is accepted as an alias.

use indexmap::IndexSet;

/// Prefix accepted in front of a rule identifier.
pub const ALIAS_PREFIX: &str = "JTCOP.";

/// Whether a single suppression value names `rule_id`.
#[must_use]
pub fn matches(value: &str, rule_id: &str) -> bool {
    value == rule_id || value.strip_prefix(ALIAS_PREFIX) == Some(rule_id)
}

/// Whether `rule_id` is in a scope's suppression set.
#[must_use]
pub fn contains(set: &IndexSet<String>, rule_id: &str) -> bool {
    set.contains(rule_id) || set.iter().any(|value| matches(value, rule_id))
}

/// Suppressions applied to every target of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suppressions {
    global: IndexSet<String>,
}

impl Suppressions {
    #[must_use]
    pub fn new<I, S>(global: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            global: global.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub const fn global(&self) -> &IndexSet<String> {
        &self.global
    }

    /// Whether `rule_id` is suppressed for a target whose own effective set
    /// is `scope`.
    #[must_use]
    pub fn is_suppressed(&self, rule_id: &str, scope: &IndexSet<String>) -> bool {
        contains(&self.global, rule_id) || contains(scope, rule_id)
    }
}

#[cfg(test)]
#[path = "suppression_tests.rs"]
mod tests;

use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;

use super::{Assertion, ClassScope, Invocation};
use crate::assertions;

/// A single test method.
///
/// Assertions are extracted from the recorded invocations on first access.
#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    line: Option<usize>,
    own_suppressed: IndexSet<String>,
    inherited_suppressed: IndexSet<String>,
    invocations: Vec<Invocation>,
    scope: Arc<ClassScope>,
    assertions: OnceLock<Vec<Assertion>>,
}

impl TestCase {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: None,
            own_suppressed: IndexSet::new(),
            inherited_suppressed: IndexSet::new(),
            invocations: Vec::new(),
            scope: Arc::default(),
            assertions: OnceLock::new(),
        }
    }

    /// Test case with the given name and nothing else, for rule tests.
    #[must_use]
    pub fn fake(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_suppressed<I, S>(mut self, suppressed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.own_suppressed
            .extend(suppressed.into_iter().map(Into::into));
        self
    }

    /// Body invocations together with what the enclosing class makes known.
    #[must_use]
    pub fn with_body(mut self, invocations: Vec<Invocation>, scope: Arc<ClassScope>) -> Self {
        self.invocations = invocations;
        self.scope = scope;
        self.assertions = OnceLock::new();
        self
    }

    /// Fix the assertions instead of extracting them from the body.
    #[must_use]
    pub fn with_assertions(mut self, assertions: Vec<Assertion>) -> Self {
        self.assertions = OnceLock::from(assertions);
        self
    }

    pub(crate) fn inherit_suppressed(&mut self, class_suppressed: &IndexSet<String>) {
        self.inherited_suppressed
            .extend(class_suppressed.iter().cloned());
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Suppressions written on the method itself.
    #[must_use]
    pub const fn own_suppressed(&self) -> &IndexSet<String> {
        &self.own_suppressed
    }

    /// Effective suppressions: the method's own plus its class's.
    #[must_use]
    pub fn suppressed(&self) -> IndexSet<String> {
        self.own_suppressed
            .iter()
            .chain(&self.inherited_suppressed)
            .cloned()
            .collect()
    }

    /// What the enclosing class makes known to the body.
    #[must_use]
    pub fn scope(&self) -> &ClassScope {
        &self.scope
    }

    #[must_use]
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        self.assertions
            .get_or_init(|| assertions::extract(&self.invocations, &self.scope))
    }
}

impl PartialEq for TestCase {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.line == other.line
            && self.own_suppressed == other.own_suppressed
            && self.inherited_suppressed == other.inherited_suppressed
            && self.invocations == other.invocations
    }
}

impl Eq for TestCase {}

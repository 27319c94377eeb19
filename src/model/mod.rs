//! Normalized view of a test suite, independent of where it was read from.

mod expr;
mod test_case;
mod test_class;

pub use expr::{ClassScope, Expr, Invocation, Receiver};
pub use test_case::TestCase;
pub use test_class::TestClass;

use std::path::PathBuf;

/// Explanation recorded for a message argument that cannot be folded.
pub const UNKNOWN_EXPLANATION: &str = "unknown at static time";

/// A recognized assertion call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// `None` when the call carries no message at all.
    pub explanation: Option<String>,
    /// The assertion cannot fail, e.g. `assertTrue(true)`.
    pub is_line_hitter: bool,
    pub is_assertion: bool,
    /// Called method, e.g. `assertEquals`.
    pub method: String,
    pub line: usize,
}

impl Assertion {
    #[must_use]
    pub fn new(method: impl Into<String>, explanation: Option<String>) -> Self {
        Self {
            explanation,
            is_line_hitter: false,
            is_assertion: true,
            method: method.into(),
            line: 0,
        }
    }

    #[must_use]
    pub const fn line_hitter(mut self, is_line_hitter: bool) -> Self {
        self.is_line_hitter = is_line_hitter;
        self
    }

    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub is_static: bool,
    /// Declared type as written in source or decoded from the descriptor.
    pub type_name: String,
    /// Simple names of the annotations on the field.
    pub annotations: Vec<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            type_name: type_name.into(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn static_field(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    #[must_use]
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations.iter().any(|a| a == simple_name)
    }
}

/// Structural facts about a test class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Characteristics {
    pub is_junit_extension: bool,
    /// Super class as written, empty when the class extends nothing.
    pub parent: String,
    pub methods: usize,
    pub interfaces: Vec<String>,
}

impl Characteristics {
    #[must_use]
    pub fn with_parent(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn extension() -> Self {
        Self {
            is_junit_extension: true,
            ..Self::default()
        }
    }
}

/// Where a [`TestClass`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    Ast,
    Bytecode,
    /// Source view merged with its compiled counterpart.
    Merged,
    /// Built in code, not read from disk.
    Synthetic,
}

/// A compiled class that is not a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionClass {
    pub fqn: String,
    pub name: String,
    pub path: PathBuf,
}

/// Everything an invocation analyzes.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub test_classes: Vec<TestClass>,
    pub production_classes: Vec<ProductionClass>,
}

impl Project {
    #[must_use]
    pub const fn new(test_classes: Vec<TestClass>, production_classes: Vec<ProductionClass>) -> Self {
        Self {
            test_classes,
            production_classes,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.test_classes.is_empty() && self.production_classes.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

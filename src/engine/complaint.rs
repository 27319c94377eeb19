use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::{TestCase, TestClass};

/// One rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Complaint {
    pub rule: &'static str,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub message: String,
}

impl Complaint {
    /// Complaint located at a test class.
    #[must_use]
    pub fn on_class(rule: &'static str, class: &TestClass, message: impl Into<String>) -> Self {
        Self {
            rule,
            path: class.path().to_path_buf(),
            line: class.line(),
            class: class.name().to_string(),
            method: None,
            message: message.into(),
        }
    }

    /// Complaint located at a test case of `class`.
    #[must_use]
    pub fn on_case(
        rule: &'static str,
        class: &TestClass,
        case: &TestCase,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            path: class.path().to_path_buf(),
            line: case.line(),
            class: class.name().to_string(),
            method: Some(case.name().to_string()),
            message: message.into(),
        }
    }

    fn sort_key(&self) -> (&Path, Option<usize>, &str, &str, Option<&str>, &str) {
        (
            &self.path,
            self.line,
            self.rule,
            &self.class,
            self.method.as_deref(),
            &self.message,
        )
    }
}

impl Ord for Complaint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Complaint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Complaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(f, ": {}", self.class)?;
        if let Some(method) = &self.method {
            write!(f, ".{method}")?;
        }
        write!(f, ": {} ({})", self.message, self.rule)
    }
}

use std::path::PathBuf;

use serde::Serialize;

use crate::engine::Report;
use crate::error::Result;

use super::{OutputFormatter, display_path};

/// Pretty-printed JSON payload: a summary, the complaints and the skipped
/// files.
#[derive(Default)]
pub struct JsonFormatter {
    project_root: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    complaints: Vec<JsonComplaint<'a>>,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct Summary {
    complaints: usize,
    diagnostics: usize,
}

#[derive(Serialize)]
struct JsonComplaint<'a> {
    rule: &'a str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    message: &'a str,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    path: String,
    reason: &'a str,
}

impl JsonFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { project_root: None }
    }

    /// Show paths relative to `root`.
    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let root = self.project_root.as_deref();
        let output = JsonOutput {
            summary: Summary {
                complaints: report.complaints.len(),
                diagnostics: report.diagnostics.len(),
            },
            complaints: report
                .complaints
                .iter()
                .map(|complaint| JsonComplaint {
                    rule: complaint.rule,
                    path: display_path(&complaint.path, root),
                    line: complaint.line,
                    class: &complaint.class,
                    method: complaint.method.as_deref(),
                    message: &complaint.message,
                })
                .collect(),
            diagnostics: report
                .diagnostics
                .iter()
                .map(|failure| JsonDiagnostic {
                    path: display_path(&failure.path, root),
                    reason: &failure.reason,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

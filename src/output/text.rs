use std::fmt::Write;
use std::path::PathBuf;

use crate::engine::{Complaint, Report};
use crate::error::Result;

use super::{OutputFormatter, display_path};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// One line per complaint, then parse diagnostics and a summary.
pub struct TextFormatter {
    use_colors: bool,
    project_root: Option<PathBuf>,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            project_root: None,
        }
    }

    /// Show paths relative to `root`.
    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_complaint(&self, complaint: &Complaint, output: &mut String) {
        let mut location = display_path(&complaint.path, self.project_root.as_deref());
        if let Some(line) = complaint.line {
            let _ = write!(location, ":{line}");
        }
        let mut target = complaint.class.clone();
        if let Some(method) = &complaint.method {
            let _ = write!(target, ".{method}");
        }
        let _ = writeln!(
            output,
            "{}: {target}: {} {}",
            self.colorize(&location, ansi::CYAN),
            complaint.message,
            self.colorize(&format!("({})", complaint.rule), ansi::YELLOW),
        );
    }

    fn format_summary(&self, report: &Report) -> String {
        let count = report.complaints.len();
        let noun = if count == 1 { "complaint" } else { "complaints" };
        let color = if count == 0 { ansi::GREEN } else { ansi::RED };
        let mut summary = format!("Summary: {} {noun}", self.colorize(&count.to_string(), color));
        if !report.diagnostics.is_empty() {
            let _ = write!(
                summary,
                ", {} files not analyzed",
                self.colorize(&report.diagnostics.len().to_string(), ansi::YELLOW)
            );
        }
        summary
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        for complaint in &report.complaints {
            self.format_complaint(complaint, &mut output);
        }

        if !report.diagnostics.is_empty() {
            if !report.complaints.is_empty() {
                output.push('\n');
            }
            for failure in &report.diagnostics {
                let _ = writeln!(
                    output,
                    "{}: {}: {}",
                    self.colorize("skipped", ansi::YELLOW),
                    display_path(&failure.path, self.project_root.as_deref()),
                    failure.reason
                );
            }
        }

        if !output.is_empty() {
            output.push('\n');
        }
        let _ = writeln!(output, "{}", self.format_summary(report));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

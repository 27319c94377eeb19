use std::fmt::Write;

use crate::rules::{Scope, registry};
use crate::EXIT_SUCCESS;

/// One line per registered rule: identifier, target and description.
#[must_use]
pub fn format_rules() -> String {
    let width = registry().iter().map(|d| d.id.len()).max().unwrap_or(0);
    let mut output = String::new();
    for descriptor in registry() {
        let scope = match descriptor.scope() {
            Scope::Class => "class",
            Scope::Case => "case",
        };
        let _ = writeln!(
            output,
            "{:<width$}  {scope:<5}  {}",
            descriptor.id, descriptor.description
        );
    }
    output
}

#[must_use]
pub fn run_rules() -> i32 {
    print!("{}", format_rules());
    EXIT_SUCCESS
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

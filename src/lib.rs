//! Static analysis of JUnit test suites.
//!
//! [`ingest`] turns a Java test source root and its compiled classes into a
//! [`model::Project`]; [`engine::analyze`] runs the [`rules`] over it and
//! returns a sorted [`engine::Report`].

pub mod assertions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod naming;
pub mod output;
pub mod pos;
pub mod rules;
pub mod state;
pub mod suppression;

pub use engine::{AnalysisOptions, Complaint, FailOn, Report, RuleSelection, analyze};
pub use error::{Result, TestcopError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_COMPLAINTS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_IO_ERROR: i32 = 3;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

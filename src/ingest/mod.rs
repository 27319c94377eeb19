//! Turns a test source root and a bytecode root into a [`Project`].
//!
//! Sources are parsed with tree-sitter, class files with a small reader.
//! Both views are merged by fully qualified name: sources contribute test
//! cases, bytecode contributes fields and characteristics. A file that cannot
//! be read or parsed becomes a [`ParseFailure`] and is otherwise skipped.

pub mod bytecode;
pub mod java;
mod scanner;

#[cfg(test)]
mod test_fixtures;

pub use bytecode::{CompiledClass, CompiledMethod};
pub use scanner::{DirectoryScanner, FileFilter, FileScanner, GlobFilter, build_glob_set};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, TestcopError};
use crate::model::{Characteristics, Origin, ProductionClass, Project, TestClass};

/// A file skipped, or only partly understood, during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl ParseFailure {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result of reading both roots.
#[derive(Debug, Default)]
pub struct Ingested {
    pub project: Project,
    pub diagnostics: Vec<ParseFailure>,
}

/// Read every `.java` file under `sources` and every `.class` file under
/// `classes`, skipping paths that match an `exclude` glob.
///
/// # Errors
/// Returns an error if either root does not exist or an exclude glob is
/// invalid. Problems with individual files are reported as diagnostics.
pub fn ingest(sources: &Path, classes: &Path, exclude: &[String]) -> Result<Ingested> {
    let sources = absolute_root(sources)?;
    let classes = absolute_root(classes)?;
    let java_files = DirectoryScanner::new(GlobFilter::new("java", exclude)?).scan(&sources)?;
    let class_files = DirectoryScanner::new(GlobFilter::new("class", exclude)?).scan(&classes)?;
    debug!(
        java = java_files.len(),
        class = class_files.len(),
        "scanned test roots"
    );

    let mut diagnostics = Vec::new();
    let source_classes = read_sources(&java_files, &mut diagnostics);
    let compiled = read_classes(&class_files, &mut diagnostics);
    diagnostics.sort();

    Ok(Ingested {
        project: merge(source_classes, compiled),
        diagnostics,
    })
}

/// Roots are canonicalized so that every class carries an absolute path.
fn absolute_root(root: &Path) -> Result<PathBuf> {
    dunce::canonicalize(root).map_err(|_| TestcopError::RootNotFound(root.to_path_buf()))
}

fn read_sources(files: &[PathBuf], diagnostics: &mut Vec<ParseFailure>) -> Vec<TestClass> {
    let parsed: Vec<_> = files
        .par_iter()
        .map(|path| (path, java::parse_file(path)))
        .collect();
    let mut classes = Vec::new();
    for (path, result) in parsed {
        match result {
            Ok(file) => {
                if file.has_errors {
                    warn!(path = %path.display(), "syntax errors, analyzing recoverable classes");
                    diagnostics.push(ParseFailure::new(path, "syntax errors"));
                }
                classes.extend(file.classes);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable source");
                diagnostics.push(ParseFailure::new(path, e.to_string()));
            }
        }
    }
    classes
}

fn read_classes(files: &[PathBuf], diagnostics: &mut Vec<ParseFailure>) -> Vec<CompiledClass> {
    let parsed: Vec<_> = files
        .par_iter()
        .map(|path| (path, bytecode::parse_file(path)))
        .collect();
    let mut classes = Vec::new();
    for (path, result) in parsed {
        match result {
            Ok(class) if class.is_type_declaration() && !class.is_auxiliary() => classes.push(class),
            Ok(class) => debug!(class = %class.fqn, "skipping auxiliary class file"),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable class file");
                diagnostics.push(ParseFailure::new(path, e.to_string()));
            }
        }
    }
    classes
}

/// Join source and compiled views of the same classes.
///
/// Compiled classes without a source counterpart become test classes when
/// they look like tests and production classes otherwise.
#[must_use]
pub fn merge(sources: Vec<TestClass>, compiled: Vec<CompiledClass>) -> Project {
    let mut by_fqn: HashMap<String, CompiledClass> = compiled
        .into_iter()
        .map(|class| (class.fqn.clone(), class))
        .collect();

    let mut tests: Vec<TestClass> = sources
        .into_iter()
        .map(|class| match by_fqn.remove(&class.fqn()) {
            Some(compiled) => class.merge_compiled(to_test_class(compiled)),
            None => class,
        })
        .collect();

    let mut production = Vec::new();
    for compiled in by_fqn.into_values() {
        if looks_like_test(&compiled) {
            tests.push(to_test_class(compiled));
        } else {
            production.push(ProductionClass {
                name: compiled.simple_name().to_string(),
                fqn: compiled.fqn,
                path: compiled.path,
            });
        }
    }

    tests.sort_by(|a, b| (a.path(), a.name()).cmp(&(b.path(), b.name())));
    production.sort_by(|a, b| (&a.path, &a.name).cmp(&(&b.path, &b.name)));
    Project::new(tests, production)
}

const TEST_SUFFIXES: [&str; 3] = ["Test", "Tests", "IT"];

fn looks_like_test(class: &CompiledClass) -> bool {
    let has_test_method = class.methods.iter().any(|method| {
        method
            .annotations
            .iter()
            .any(|a| java::TEST_ANNOTATIONS.contains(&a.as_str()))
    });
    has_test_method
        || is_extension(class)
        || TEST_SUFFIXES
            .iter()
            .any(|suffix| class.simple_name().ends_with(suffix))
}

fn is_extension(class: &CompiledClass) -> bool {
    class
        .interfaces
        .iter()
        .any(|i| java::is_extension_interface(i))
}

/// Bytecode-only view of a class; cases need sources and stay empty.
fn to_test_class(compiled: CompiledClass) -> TestClass {
    let characteristics = Characteristics {
        is_junit_extension: is_extension(&compiled),
        parent: compiled
            .super_name
            .clone()
            .filter(|parent| parent != "java.lang.Object")
            .unwrap_or_default(),
        methods: compiled
            .methods
            .iter()
            .filter(|m| !m.is_synthetic && !m.name.starts_with('<'))
            .count(),
        interfaces: compiled.interfaces.clone(),
    };
    TestClass::new(compiled.simple_name(), &compiled.path, Origin::Bytecode)
        .with_package(compiled.package())
        .with_fields(compiled.fields)
        .with_characteristics(characteristics)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{Result, TestcopError};

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths, sorted.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub trait FileFilter {
    /// `relative` is `path` relative to the scanned root.
    fn should_include(&self, path: &Path, relative: &Path) -> bool;
}

/// Accepts one file extension and rejects anything matching an exclude glob.
pub struct GlobFilter {
    extension: String,
    exclude_patterns: GlobSet,
}

impl GlobFilter {
    /// Create a new filter with the given extension and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extension: impl Into<String>, exclude_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            extension: extension.into(),
            exclude_patterns: build_glob_set(exclude_patterns)?,
        })
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    fn is_excluded(&self, path: &Path, relative: &Path) -> bool {
        self.exclude_patterns.is_match(relative) || self.exclude_patterns.is_match(path)
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path, relative: &Path) -> bool {
        self.has_valid_extension(path) && !self.is_excluded(path, relative)
    }
}

/// Compile exclude globs into one set.
///
/// # Errors
/// Returns [`TestcopError::InvalidPattern`] naming the first bad pattern.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| TestcopError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| TestcopError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(TestcopError::RootNotFound(root.to_path_buf()));
        }
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| {
                let relative = p.strip_prefix(root).unwrap_or(p.as_path());
                self.filter.should_include(p, relative)
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;

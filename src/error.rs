use std::path::PathBuf;

use thiserror::Error;

use crate::{EXIT_CONFIG_ERROR, EXIT_IO_ERROR};

#[derive(Error, Debug)]
pub enum TestcopError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("POS model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl TestcopError {
    /// Process exit code for an error that aborts the run.
    ///
    /// Problems locating or reading the analyzed roots map to the I/O code,
    /// everything else is reported as a configuration problem.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::RootNotFound(_) | Self::FileRead { .. } | Self::Io(_) => EXIT_IO_ERROR,
            _ => EXIT_CONFIG_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, TestcopError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Error types for cfgstore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CfgError
pub type Result<T> = std::result::Result<T, CfgError>;

/// Unified error type for cfgstore operations
#[derive(Debug, Error)]
pub enum CfgError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    /// Grammar violation; `line` is 1-based
    #[error("Syntax error found in {} on line {line}", .file.display())]
    Syntax { file: PathBuf, line: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Validation Errors (raised before any file access)
    // -------------------------------------------------------------------------
    #[error("Invalid character found in value: {ch:?} found in {value:?}")]
    InvalidValue { ch: char, value: String },

    #[error("Invalid character found in name: {ch:?} found in {name:?}")]
    InvalidName { ch: char, name: String },
}

impl CfgError {
    pub(crate) fn syntax(file: impl Into<PathBuf>, line: usize) -> Self {
        CfgError::Syntax {
            file: file.into(),
            line,
        }
    }

    /// Line number of a syntax error, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            CfgError::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

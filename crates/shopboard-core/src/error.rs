//! Error types for shopboard-core
//!
//! Two classes matter to callers: data-unavailable errors (a backing table
//! is missing or malformed, fatal at startup) and selection errors
//! (malformed filter input, surfaced to the UI before the pipeline runs).
//! Producing zero rows is not an error anywhere in the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shopboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Table Errors
    // ===================
    #[error("Failed to parse table {path}: {message}")]
    TableParse {
        path: PathBuf,
        message: String,
        #[source]
        source: csv::Error,
    },

    #[error("Bad value in {path} row {row}: {message}")]
    SchemaMismatch {
        path: PathBuf,
        row: usize,
        message: String,
    },

    // ===================
    // Selection Errors
    // ===================
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },
}

impl CoreError {
    /// True for the fatal-at-startup class: a backing file is missing,
    /// unreadable, or fails its schema contract. There is no partial load.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            CoreError::FileRead { .. }
                | CoreError::FileNotFound { .. }
                | CoreError::TableParse { .. }
                | CoreError::SchemaMismatch { .. }
        )
    }
}

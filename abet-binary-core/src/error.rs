//! Error types for the binary conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a raw export.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("'Evnt_Time' column not found")]
    MissingDataMarker,

    #[error("Event table has {found} columns, expected at least {expected}")]
    MissingColumns { found: usize, expected: usize },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),
}

impl ConvertError {
    /// Returns true for errors that mean "nothing to convert" rather than a broken file.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingDataMarker)
    }
}

// Error taxonomy for loading and writing NEO data
//
// Every failure aborts the whole operation: no row skipping, no retries.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeoError {
    /// Missing or unreadable file, forwarded as-is
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Missing required key '{key}' in {path}")]
    MissingKey { path: PathBuf, key: String },

    #[error("Close approach entry {index} has {found} fields, expected at least {expected}")]
    TooFewFields {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value for '{field}' ({location}): {value:?}")]
    InvalidValue {
        field: String,
        value: String,
        location: String,
    },

    #[error("Unsupported output format for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid filter: {reason}")]
    InvalidFilter { reason: String },
}

impl NeoError {
    pub(crate) fn invalid_value(
        field: &str,
        value: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        NeoError::InvalidValue {
            field: field.to_string(),
            value: value.into(),
            location: location.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = NeoError::from(io);
        assert_eq!(err.to_string(), "no such file");
        assert!(matches!(err, NeoError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = NeoError::invalid_value("diameter", "abc", "line 3");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'diameter' (line 3): \"abc\""
        );
    }
}

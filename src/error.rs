//! Unified error hierarchy for fitstats
//!
//! Every failure along the package → training → report path is surfaced as a
//! `FitStatsError` so the driver can log it and move on to the next package.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all fitstats operations
#[derive(Debug, Error)]
pub enum FitStatsError {
    /// Type code not in the dispatch table
    #[error("Unknown workout type: {code}")]
    UnknownWorkoutType { code: String },

    /// Raw reading has the wrong number of values for its type code
    #[error("Invalid reading for {code}: expected {expected} values, got {actual}")]
    InvalidArity {
        code: String,
        expected: usize,
        actual: usize,
    },

    /// A raw value is outside the range its formula can handle
    #[error("Validation error in {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Package file extension we cannot read
    #[error("Unsupported package format: {format}")]
    UnsupportedFormat { format: String },

    /// Package file could not be parsed
    #[error("Invalid package file {path}: {reason}")]
    PackageFile { path: PathBuf, reason: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for fitstats operations
pub type Result<T> = std::result::Result<T, FitStatsError>;

impl FitStatsError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        FitStatsError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the driver can skip the offending package and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FitStatsError::UnknownWorkoutType { .. }
                | FitStatsError::InvalidArity { .. }
                | FitStatsError::Validation { .. }
        )
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FitStatsError::UnknownWorkoutType { code } => {
                format!(
                    "'{}' is not a known workout type. Use RUN, WLK or SWM.",
                    code
                )
            }
            FitStatsError::InvalidArity {
                code,
                expected,
                actual,
            } => {
                format!(
                    "A {} reading needs {} values but {} were given.",
                    code, expected, actual
                )
            }
            FitStatsError::PackageFile { path, .. } => {
                format!("Could not read workout packages from {}", path.display())
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverable() {
        let err = FitStatsError::UnknownWorkoutType {
            code: "XYZ".to_string(),
        };
        assert!(err.is_recoverable());

        let err = FitStatsError::Config("bad".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let err = FitStatsError::UnknownWorkoutType {
            code: "XYZ".to_string(),
        };
        assert!(err.user_message().contains("'XYZ'"));

        let err = FitStatsError::InvalidArity {
            code: "WLK".to_string(),
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid reading for WLK: expected 4 values, got 3"
        );
    }
}

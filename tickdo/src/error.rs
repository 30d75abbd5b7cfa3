//! Error types for tickdo.
//!
//! This module defines the crate-level error type aggregating the
//! per-concern errors, providing structured error handling with clear,
//! human-readable messages. By design most of the core's failure surface
//! is silent (validation misses, corrupt stored data), so the variants
//! here are environmental.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::types::ParseEnumError;

/// Errors that can occur during tickdo operations.
///
/// This is the primary error type for the crate, encompassing all
/// surfaced failure modes.
#[derive(Error, Debug)]
pub enum TickdoError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid priority or category value.
    #[error("{0}")]
    Parse(#[from] ParseEnumError),

    /// Invalid due-date value.
    #[error("invalid due date '{value}': expected RFC 3339, e.g. 2026-09-01T12:00:00Z")]
    InvalidDueDate {
        /// The rejected input value.
        value: String,
    },
}

/// A specialized `Result` type for tickdo operations.
pub type Result<T> = std::result::Result<T, TickdoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_conversion() {
        let config_err = ConfigError::NoHomeDirectory;
        let err: TickdoError = config_err.into();
        assert!(matches!(err, TickdoError::Config(_)));
        assert_eq!(
            err.to_string(),
            "configuration error: failed to determine home directory"
        );
    }

    #[test]
    fn parse_error_conversion() {
        let parse_err = "urgent".parse::<crate::types::Priority>().unwrap_err();
        let err: TickdoError = parse_err.into();
        assert!(matches!(err, TickdoError::Parse(_)));
    }

    #[test]
    fn invalid_due_date_display() {
        let err = TickdoError::InvalidDueDate {
            value: "tomorrow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid due date 'tomorrow': expected RFC 3339, e.g. 2026-09-01T12:00:00Z"
        );
    }

    #[test]
    fn error_source_chain() {
        use std::error::Error;

        let config_err = ConfigError::InvalidValue {
            key: "TICKDO_TICK_MS".to_string(),
            message: "expected positive integer".to_string(),
        };
        let err: TickdoError = config_err.into();
        assert!(err.source().is_some());
    }

    #[test]
    fn result_type_alias_works() {
        fn example_function() -> Result<i32> {
            Ok(42)
        }

        assert!(example_function().is_ok());
    }
}

//! # Error Types
//!
//! Structured error types for cost_core. Every variant carries enough context
//! for a caller to explain the failure without parsing a message string.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::errors::{CalcError, CalcResult};
//!
//! fn check_power(power_watts: f64) -> CalcResult<()> {
//!     if power_watts <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "power_watts",
//!             power_watts.to_string(),
//!             "Power must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_power(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationIssue;

/// Result type alias for cost_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for cost_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not a number, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A catalog already holds an entry with this name (case-insensitive)
    #[error("Duplicate {catalog} entry: '{name}' already exists")]
    DuplicateName { catalog: String, name: String },

    /// No catalog entry matches this name exactly
    #[error("No {catalog} entry named '{name}'")]
    EntryNotFound { catalog: String, name: String },

    /// One or more required project fields are missing or out of range
    #[error("Validation failed: {} issue(s)", issues.len())]
    ValidationFailed { issues: Vec<ValidationIssue> },

    /// Computed costs were requested before the engine ran on the current inputs
    #[error("Costs have not been calculated for project '{project_name}'")]
    NotCalculated { project_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Configuration file could not be parsed or written
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DuplicateName error
    pub fn duplicate_name(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        CalcError::DuplicateName {
            catalog: catalog.into(),
            name: name.into(),
        }
    }

    /// Create an EntryNotFound error
    pub fn entry_not_found(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        CalcError::EntryNotFound {
            catalog: catalog.into(),
            name: name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by the backing store rather than the caller's input.
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            CalcError::FileError { .. }
                | CalcError::SerializationError { .. }
                | CalcError::VersionMismatch { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DuplicateName { .. } => "DUPLICATE_NAME",
            CalcError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::NotCalculated { .. } => "NOT_CALCULATED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error =
            CalcError::invalid_input("print_duration_hours", "-5", "Value must not be negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_validation_failed_carries_issues() {
        let error = CalcError::ValidationFailed {
            issues: vec![
                ValidationIssue::ProjectNameRequired,
                ValidationIssue::PrinterPowerRequired,
            ],
        };
        assert_eq!(error.to_string(), "Validation failed: 2 issue(s)");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("ProjectNameRequired"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::duplicate_name("filament", "PLA").error_code(), "DUPLICATE_NAME");
        assert_eq!(CalcError::entry_not_found("dryer", "X").error_code(), "ENTRY_NOT_FOUND");
        assert_eq!(CalcError::config("printcost.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_persistence_classification() {
        assert!(CalcError::file_error("write", "a.json", "denied").is_persistence_error());
        assert!(CalcError::serialization("eof").is_persistence_error());
        assert!(!CalcError::duplicate_name("printer", "P").is_persistence_error());
    }
}

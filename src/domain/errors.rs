//! Domain error types
//!
//! This module defines the error hierarchy for Cloak. All errors are
//! domain-specific and don't expose third-party types. Validation and
//! engine failures are ordinary return values; nothing here is treated
//! as fatal to the process.

use thiserror::Error;

/// Main Cloak error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CloakError {
    /// Request validation failures
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Generalization hierarchy failures
    #[error("Invalid hierarchy: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Anonymization engine failures
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Request validation failures
///
/// Checked in declaration order; the first violated precondition is
/// reported and later checks are not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request carries no dataset rows
    #[error("request contains no dataset rows")]
    MissingData,

    /// The request declares no attributes
    #[error("request declares no attributes")]
    MissingAttributes,

    /// The request declares no privacy models
    #[error("request declares no privacy models")]
    MissingPrivacyModels,

    /// A dataset row does not match the declared attribute count
    #[error("row {row} has {found} columns but {expected} attributes are declared")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Quasi-identifying attributes lacking a generalization hierarchy
    #[error("quasi-identifying attributes without a generalization hierarchy: {fields}")]
    InsufficientHierarchies { fields: String },
}

/// Generalization hierarchy failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A declared hierarchy is structurally unusable
    #[error("malformed hierarchy for attribute '{field}': {reason}")]
    Malformed { field: String, reason: String },
}

/// Anonymization engine failures
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not produce a solution satisfying every privacy model
    #[error("engine execution failed: {0}")]
    Execution(String),

    /// The engine exceeded the configured time budget
    #[error("engine exceeded the {timeout_ms} ms time budget")]
    Timeout { timeout_ms: u64 },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CloakError {
    fn from(err: std::io::Error) -> Self {
        CloakError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CloakError {
    fn from(err: serde_json::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CloakError {
    fn from(err: toml::de::Error) -> Self {
        CloakError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_conversion() {
        let err: CloakError = ValidationError::MissingData.into();
        assert!(matches!(err, CloakError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Invalid request: request contains no dataset rows"
        );
    }

    #[test]
    fn test_hierarchy_error_conversion() {
        let hierarchy_err = HierarchyError::Malformed {
            field: "zipcode".to_string(),
            reason: "ragged rows".to_string(),
        };
        let err: CloakError = hierarchy_err.into();
        assert!(matches!(err, CloakError::Hierarchy(_)));
    }

    #[test]
    fn test_engine_timeout_display() {
        let err = EngineError::Timeout { timeout_ms: 30_000 };
        assert_eq!(err.to_string(), "engine exceeded the 30000 ms time budget");
    }

    #[test]
    fn test_insufficient_hierarchies_names_fields() {
        let err = ValidationError::InsufficientHierarchies {
            fields: "gender, zipcode".to_string(),
        };
        assert!(err.to_string().contains("gender, zipcode"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CloakError = io_err.into();
        assert!(matches!(err, CloakError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CloakError = json_err.into();
        assert!(matches!(err, CloakError::Serialization(_)));
    }

    #[test]
    fn test_cloak_error_implements_std_error() {
        let err = CloakError::Configuration("bad config".to_string());
        let _: &dyn std::error::Error = &err;
    }
}

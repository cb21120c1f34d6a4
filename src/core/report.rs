//! Error reporting
//!
//! Maps pipeline failures to the structured error response handed to the
//! boundary layer. Caller input errors and engine failures are kept
//! distinguishable so the transport can map them to different codes.
//! Messages describe the violated precondition; internal detail beyond that
//! never leaks.

use crate::domain::{CloakError, EngineError};
use serde::{Deserialize, Serialize};

/// Coarse failure category for the boundary layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionKind {
    /// Caller input error; recoverable by fixing the request
    InvalidRequest,
    /// The engine could not produce a compliant solution
    EngineFailure,
    /// The engine exceeded its time budget
    EngineTimeout,
}

/// Structured error response for a rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionResponse {
    pub message: String,
    pub kind: RejectionKind,
}

impl ExceptionResponse {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl From<&CloakError> for ExceptionResponse {
    fn from(err: &CloakError) -> Self {
        let kind = match err {
            CloakError::Engine(EngineError::Timeout { .. }) => RejectionKind::EngineTimeout,
            CloakError::Engine(_) => RejectionKind::EngineFailure,
            _ => RejectionKind::InvalidRequest,
        };
        Self::new(kind, err.to_string())
    }
}

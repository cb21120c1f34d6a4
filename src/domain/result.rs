//! Result type alias for Cloak
//!
//! This module provides a convenient Result type alias that uses CloakError
//! as the error type.

use super::errors::CloakError;

/// Result type alias for Cloak operations
///
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, CloakError>;

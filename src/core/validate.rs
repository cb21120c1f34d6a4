//! Request validation
//!
//! Structural completeness checks for an incoming anonymization request,
//! evaluated before any computation starts. Checks run in a fixed order and
//! the first failure wins. Pure function of the request; no side effects.

use crate::domain::{AnonymizationRequest, ValidationError};

/// Validate an anonymization request
///
/// Checks, in order:
/// 1. the dataset is non-empty
/// 2. attributes are declared
/// 3. privacy models are declared
/// 4. every row matches the declared attribute count
/// 5. every quasi-identifying attribute carries a usable hierarchy
///
/// Hierarchy matching is identity-based: an attribute's own hierarchy counts,
/// a hierarchy on some other attribute does not.
pub fn validate(request: &AnonymizationRequest) -> Result<(), ValidationError> {
    if request.data.is_empty() {
        return Err(ValidationError::MissingData);
    }
    if request.attributes.is_empty() {
        return Err(ValidationError::MissingAttributes);
    }
    if request.privacy_models.is_empty() {
        return Err(ValidationError::MissingPrivacyModels);
    }

    let expected = request.attributes.len();
    for (row, values) in request.data.iter().enumerate() {
        if values.len() != expected {
            return Err(ValidationError::ColumnMismatch {
                row,
                expected,
                found: values.len(),
            });
        }
    }

    let missing: Vec<&str> = request
        .attributes
        .iter()
        .filter(|a| a.is_quasi_identifying() && !a.has_usable_hierarchy())
        .map(|a| a.field.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::InsufficientHierarchies {
            fields: missing.join(", "),
        });
    }

    Ok(())
}

//! Hierarchy resolution
//!
//! Maps each quasi-identifying attribute onto the generalization hierarchy
//! handed to the engine. Declared hierarchies are used verbatim, after
//! structural checks: uniform row width, level-0 coverage of the dataset
//! values, and monotonicity of generality across levels. Monotonicity is
//! checked permissively: a level is only rejected when it has strictly more
//! distinct values than the level below it, since a coarser representation
//! can never split values apart.

use crate::domain::{AnonymizationRequest, HierarchyError};
use std::collections::HashSet;

/// A quasi-identifying attribute's hierarchy, ready for the engine
#[derive(Debug, Clone)]
pub struct ResolvedHierarchy {
    /// Column name
    pub field: String,

    /// Column index in the dataset
    pub column: usize,

    /// Hierarchy table: one row per source value, columns ordered level 0
    /// (the value itself) to most general
    pub rows: Vec<Vec<String>>,

    /// Number of levels, level 0 included
    pub height: usize,
}

/// Resolve the hierarchy for every quasi-identifying attribute
///
/// Returns hierarchies in attribute (column) order. Assumes the request has
/// passed validation; a quasi-identifying attribute without a hierarchy is
/// still reported as malformed rather than panicking.
pub fn resolve(request: &AnonymizationRequest) -> Result<Vec<ResolvedHierarchy>, HierarchyError> {
    let mut resolved = Vec::new();
    for (column, attribute) in request.attributes.iter().enumerate() {
        if !attribute.is_quasi_identifying() {
            continue;
        }
        let rows = attribute.hierarchy.as_ref().ok_or_else(|| malformed(
            &attribute.field,
            "no hierarchy declared",
        ))?;

        let height = check_structure(&attribute.field, rows)?;
        check_coverage(&attribute.field, rows, request, column)?;
        check_monotonicity(&attribute.field, rows, height)?;

        resolved.push(ResolvedHierarchy {
            field: attribute.field.clone(),
            column,
            rows: rows.clone(),
            height,
        });
    }
    Ok(resolved)
}

fn malformed(field: &str, reason: impl Into<String>) -> HierarchyError {
    HierarchyError::Malformed {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Rows must be non-empty and uniform in width; returns the level count
fn check_structure(field: &str, rows: &[Vec<String>]) -> Result<usize, HierarchyError> {
    let height = rows.first().map(Vec::len).unwrap_or(0);
    if height == 0 {
        return Err(malformed(field, "hierarchy has no levels"));
    }
    for (index, row) in rows.iter().enumerate() {
        if row.len() != height {
            return Err(malformed(
                field,
                format!(
                    "row {} has {} levels but row 0 has {}",
                    index,
                    row.len(),
                    height
                ),
            ));
        }
    }
    Ok(height)
}

/// Every dataset value for the column must appear at level 0
fn check_coverage(
    field: &str,
    rows: &[Vec<String>],
    request: &AnonymizationRequest,
    column: usize,
) -> Result<(), HierarchyError> {
    let covered: HashSet<&str> = rows
        .iter()
        .filter_map(|row| row.first())
        .map(String::as_str)
        .collect();

    let mut missing: Vec<&str> = Vec::new();
    for row in request.data.iter().skip(1) {
        if let Some(value) = row.get(column) {
            if !covered.contains(value.as_str()) && !missing.contains(&value.as_str()) {
                missing.push(value);
            }
        }
    }
    if !missing.is_empty() {
        missing.truncate(5);
        return Err(malformed(
            field,
            format!("dataset values not covered at level 0: {}", missing.join(", ")),
        ));
    }
    Ok(())
}

/// Distinct value counts must not grow as levels get more general
fn check_monotonicity(
    field: &str,
    rows: &[Vec<String>],
    height: usize,
) -> Result<(), HierarchyError> {
    let mut previous: Option<usize> = None;
    for level in 0..height {
        let distinct: HashSet<&str> = rows
            .iter()
            .filter_map(|row| row.get(level))
            .map(String::as_str)
            .collect();
        if let Some(previous) = previous {
            if distinct.len() > previous {
                return Err(malformed(
                    field,
                    format!(
                        "level {} has {} distinct values, more than level {} ({})",
                        level,
                        distinct.len(),
                        level - 1,
                        previous
                    ),
                ));
            }
        }
        previous = Some(distinct.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attribute, AttributeType, PrivacyModel};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn request_with_zipcode_hierarchy(hierarchy: Vec<Vec<String>>) -> AnonymizationRequest {
        AnonymizationRequest {
            data: vec![
                strings(&["zipcode"]),
                strings(&["47677"]),
                strings(&["47678"]),
            ],
            attributes: vec![
                Attribute::new("zipcode", AttributeType::QuasiIdentifyingAttribute)
                    .with_hierarchy(hierarchy),
            ],
            privacy_models: vec![PrivacyModel::KAnonymity { k: 2 }],
        }
    }

    #[test]
    fn test_resolves_in_column_order() {
        let request = AnonymizationRequest {
            data: vec![
                strings(&["age", "gender"]),
                strings(&["34", "male"]),
            ],
            attributes: vec![
                Attribute::new("age", AttributeType::InsensitiveAttribute),
                Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
                    .with_hierarchy(vec![strings(&["male", "*"])]),
            ],
            privacy_models: vec![PrivacyModel::KAnonymity { k: 1 }],
        };
        let resolved = resolve(&request).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].field, "gender");
        assert_eq!(resolved[0].column, 1);
        assert_eq!(resolved[0].height, 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let request = request_with_zipcode_hierarchy(vec![
            strings(&["47677", "476**"]),
            strings(&["47678"]),
        ]);
        let err = resolve(&request).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_uncovered_dataset_value_rejected() {
        let request = request_with_zipcode_hierarchy(vec![strings(&["47677", "476**"])]);
        let err = resolve(&request).unwrap_err();
        assert!(err.to_string().contains("47678"));
    }

    #[test]
    fn test_growing_distinct_counts_rejected() {
        // Level 1 splits the two values further apart than level 0 groups them.
        let request = request_with_zipcode_hierarchy(vec![
            strings(&["47677", "a"]),
            strings(&["47678", "b"]),
            strings(&["47677", "c"]),
        ]);
        let err = resolve(&request).unwrap_err();
        assert!(err.to_string().contains("distinct values"));
    }

    #[test]
    fn test_equal_distinct_counts_allowed() {
        // A level that merely relabels values is ambiguous but tolerated.
        let request = request_with_zipcode_hierarchy(vec![
            strings(&["47677", "x", "*"]),
            strings(&["47678", "y", "*"]),
        ]);
        assert!(resolve(&request).is_ok());
    }
}

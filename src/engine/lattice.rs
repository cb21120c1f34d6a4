//! Reference generalization-search engine
//!
//! [`LatticeEngine`] enumerates the generalization lattice spanned by the
//! quasi-identifier hierarchies breadth-first: nodes ordered by total
//! generalization level, ties broken lexicographically, so the first
//! satisfying node is a minimal transformation and repeated runs over the
//! same input pick the same solution. At each node the engine applies the
//! hierarchy levels to quasi-identifying columns, suppresses identifying
//! columns wholesale, optionally suppresses outlier records within the
//! configured limit, and checks every privacy model against the induced
//! equivalence classes.
//!
//! The search is CPU-bound and runs on the blocking thread pool.

use crate::domain::{AttributeType, EngineError, PrivacyModel};
use crate::engine::{
    risk, AchievedLevel, AnonymizationEngine, EngineRequest, EngineSolution, ModelOutcome,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Cell value used for suppressed columns and records
const SUPPRESSED: &str = "*";

/// Built-in breadth-first lattice search engine
#[derive(Debug, Default)]
pub struct LatticeEngine;

impl LatticeEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnonymizationEngine for LatticeEngine {
    async fn anonymize(&self, request: EngineRequest) -> Result<EngineSolution, EngineError> {
        tokio::task::spawn_blocking(move || search(request))
            .await
            .map_err(|e| EngineError::Execution(format!("engine worker failed: {e}")))?
    }
}

/// One quasi-identifying column prepared for generalization
struct QuasiColumn {
    column: usize,
    field: String,
    /// Number of hierarchy levels, level 0 included
    height: usize,
    /// Source value to its per-level representations
    lookup: HashMap<String, Vec<String>>,
}

fn search(request: EngineRequest) -> Result<EngineSolution, EngineError> {
    let quasi = build_quasi_columns(&request)?;
    let identifying: Vec<usize> = request
        .attributes
        .iter()
        .enumerate()
        .filter(|(_, a)| a.attribute_type == AttributeType::IdentifyingAttribute)
        .map(|(column, _)| column)
        .collect();

    let heights: Vec<usize> = quasi.iter().map(|q| q.height).collect();
    let max_total: usize = heights.iter().map(|h| h.saturating_sub(1)).sum();

    for total in 0..=max_total {
        for node in nodes_with_sum(&heights, total) {
            if let Some(solution) = evaluate_node(&request, &quasi, &identifying, &node)? {
                tracing::debug!(levels = ?node, "Lattice node satisfies all privacy models");
                return Ok(solution);
            }
        }
    }

    Err(EngineError::Execution(
        "no generalization in the search lattice satisfies every privacy model".to_string(),
    ))
}

fn build_quasi_columns(request: &EngineRequest) -> Result<Vec<QuasiColumn>, EngineError> {
    let mut quasi = Vec::new();
    for (column, attribute) in request.attributes.iter().enumerate() {
        if attribute.attribute_type != AttributeType::QuasiIdentifyingAttribute {
            continue;
        }
        let rows = attribute.hierarchy.as_ref().ok_or_else(|| {
            EngineError::Execution(format!(
                "attribute '{}' is quasi-identifying but carries no hierarchy",
                attribute.field
            ))
        })?;
        let height = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 {
            return Err(EngineError::Execution(format!(
                "attribute '{}' carries an empty hierarchy",
                attribute.field
            )));
        }
        let mut lookup = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(value) = row.first() {
                // First row wins for duplicate source values.
                lookup.entry(value.clone()).or_insert_with(|| row.clone());
            }
        }
        quasi.push(QuasiColumn {
            column,
            field: attribute.field.clone(),
            height,
            lookup,
        });
    }
    Ok(quasi)
}

/// All level combinations with the given total, lexicographically ascending
fn nodes_with_sum(heights: &[usize], target: usize) -> Vec<Vec<usize>> {
    let mut nodes = Vec::new();
    let mut current = Vec::with_capacity(heights.len());
    fill_levels(heights, target, &mut current, &mut nodes);
    nodes
}

fn fill_levels(
    heights: &[usize],
    remaining: usize,
    current: &mut Vec<usize>,
    nodes: &mut Vec<Vec<usize>>,
) {
    match heights.split_first() {
        None => {
            if remaining == 0 {
                nodes.push(current.clone());
            }
        }
        Some((&height, rest)) => {
            let max_level = height.saturating_sub(1).min(remaining);
            for level in 0..=max_level {
                current.push(level);
                fill_levels(rest, remaining - level, current, nodes);
                current.pop();
            }
        }
    }
}

/// Evaluate one lattice node; `Ok(None)` means the node does not comply
fn evaluate_node(
    request: &EngineRequest,
    quasi: &[QuasiColumn],
    identifying: &[usize],
    node: &[usize],
) -> Result<Option<EngineSolution>, EngineError> {
    let generalized = generalize_rows(request, quasi, identifying, node)?;

    let quasi_columns: Vec<usize> = quasi.iter().map(|q| q.column).collect();
    let mut classes: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (index, row) in generalized.iter().enumerate() {
        let key: Vec<String> = quasi_columns
            .iter()
            .filter_map(|&column| row.get(column).cloned())
            .collect();
        classes.entry(key).or_default().push(index);
    }

    // Records in classes below the strongest k requirement may be suppressed,
    // but only within the configured limit.
    let suppressed = match strongest_k(&request.privacy_models) {
        Some(k) => {
            let candidates: HashSet<usize> = classes
                .values()
                .filter(|members| members.len() < k as usize)
                .flatten()
                .copied()
                .collect();
            let total = generalized.len();
            if total > 0 && candidates.len() as f64 / total as f64 > request.settings.suppression_limit
            {
                return Ok(None);
            }
            candidates
        }
        None => HashSet::new(),
    };

    let kept_classes: Vec<&Vec<usize>> = classes
        .values()
        .filter(|members| !members.iter().any(|index| suppressed.contains(index)))
        .collect();

    for model in &request.privacy_models {
        if !model_holds(model, &kept_classes, &generalized, &request.header)? {
            return Ok(None);
        }
    }

    let width = request.header.len();
    let rows: Vec<Vec<String>> = generalized
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            if suppressed.contains(&index) {
                vec![SUPPRESSED.to_string(); width]
            } else {
                row
            }
        })
        .collect();

    let class_sizes: Vec<usize> = kept_classes.iter().map(|members| members.len()).collect();
    let risk_measures = risk::prosecutor_risk_measures(&class_sizes, suppressed.len());

    Ok(Some(EngineSolution {
        header: request.header.clone(),
        rows,
        generalization_levels: quasi
            .iter()
            .zip(node)
            .map(|(q, &level)| AchievedLevel {
                field: q.field.clone(),
                level,
            })
            .collect(),
        model_outcomes: request
            .privacy_models
            .iter()
            .map(|model| ModelOutcome {
                model: model.clone(),
                satisfied: true,
            })
            .collect(),
        risk_measures,
    }))
}

fn generalize_rows(
    request: &EngineRequest,
    quasi: &[QuasiColumn],
    identifying: &[usize],
    node: &[usize],
) -> Result<Vec<Vec<String>>, EngineError> {
    let mut generalized = request.rows.clone();
    for row in &mut generalized {
        for (q, &level) in quasi.iter().zip(node) {
            let value = row.get(q.column).cloned().unwrap_or_default();
            let levels = q.lookup.get(&value).ok_or_else(|| {
                EngineError::Execution(format!(
                    "value '{}' is not covered by the hierarchy for attribute '{}'",
                    value, q.field
                ))
            })?;
            let replacement = levels.get(level).ok_or_else(|| {
                EngineError::Execution(format!(
                    "hierarchy for attribute '{}' has no level {}",
                    q.field, level
                ))
            })?;
            row[q.column] = replacement.clone();
        }
        for &column in identifying {
            if let Some(cell) = row.get_mut(column) {
                *cell = SUPPRESSED.to_string();
            }
        }
    }
    Ok(generalized)
}

fn strongest_k(models: &[PrivacyModel]) -> Option<u32> {
    models
        .iter()
        .filter_map(|model| match model {
            PrivacyModel::KAnonymity { k } => Some(*k),
            _ => None,
        })
        .max()
}

fn model_holds(
    model: &PrivacyModel,
    classes: &[&Vec<usize>],
    rows: &[Vec<String>],
    header: &[String],
) -> Result<bool, EngineError> {
    match model {
        PrivacyModel::KAnonymity { k } => {
            Ok(classes.iter().all(|members| members.len() >= *k as usize))
        }
        PrivacyModel::LDiversity { l, column_name } => {
            let column = header
                .iter()
                .position(|name| name == column_name)
                .ok_or_else(|| {
                    EngineError::Execution(format!(
                        "l-diversity references unknown column '{column_name}'"
                    ))
                })?;
            Ok(classes.iter().all(|members| {
                let distinct: HashSet<&str> = members
                    .iter()
                    .filter_map(|&index| rows.get(index))
                    .filter_map(|row| row.get(column))
                    .map(String::as_str)
                    .collect();
                distinct.len() >= *l as usize
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineAttribute, EngineSettings};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn gender_hierarchy() -> Vec<Vec<String>> {
        vec![strings(&["male", "*"]), strings(&["female", "*"])]
    }

    fn request(
        rows: Vec<Vec<String>>,
        models: Vec<PrivacyModel>,
        suppression_limit: f64,
    ) -> EngineRequest {
        EngineRequest {
            header: strings(&["name", "gender", "diagnosis"]),
            rows,
            attributes: vec![
                EngineAttribute {
                    field: "name".to_string(),
                    attribute_type: AttributeType::IdentifyingAttribute,
                    hierarchy: None,
                },
                EngineAttribute {
                    field: "gender".to_string(),
                    attribute_type: AttributeType::QuasiIdentifyingAttribute,
                    hierarchy: Some(gender_hierarchy()),
                },
                EngineAttribute {
                    field: "diagnosis".to_string(),
                    attribute_type: AttributeType::SensitiveAttribute,
                    hierarchy: None,
                },
            ],
            privacy_models: models,
            settings: EngineSettings { suppression_limit },
        }
    }

    #[test]
    fn test_nodes_enumerated_by_sum_then_lexicographically() {
        let heights = [2, 2];
        assert_eq!(nodes_with_sum(&heights, 0), vec![vec![0, 0]]);
        assert_eq!(nodes_with_sum(&heights, 1), vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(nodes_with_sum(&heights, 2), vec![vec![1, 1]]);
    }

    #[test]
    fn test_identifying_column_is_suppressed() {
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["bob", "male", "flu"]),
            strings(&["carol", "female", "cold"]),
            strings(&["dave", "male", "cold"]),
        ];
        let solution = search(request(
            rows,
            vec![PrivacyModel::KAnonymity { k: 2 }],
            0.0,
        ))
        .unwrap();
        assert!(solution.rows.iter().all(|row| row[0] == SUPPRESSED));
        // Two of each gender: no generalization needed.
        assert_eq!(solution.generalization_levels[0].level, 0);
    }

    #[test]
    fn test_minimal_generalization_is_chosen() {
        // A single male record forces the gender column up one level.
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["bob", "male", "flu"]),
            strings(&["carol", "female", "cold"]),
        ];
        let solution = search(request(
            rows,
            vec![PrivacyModel::KAnonymity { k: 2 }],
            0.0,
        ))
        .unwrap();
        assert_eq!(solution.generalization_levels[0].level, 1);
        assert!(solution.rows.iter().all(|row| row[1] == "*"));
        assert!(solution.all_models_satisfied());
    }

    #[test]
    fn test_exhausted_lattice_is_an_execution_error() {
        // k exceeds the record count, so even full generalization fails.
        let rows = vec![strings(&["alice", "female", "flu"])];
        let err = search(request(
            rows,
            vec![PrivacyModel::KAnonymity { k: 2 }],
            0.0,
        ))
        .unwrap_err();
        assert!(matches!(err, EngineError::Execution(_)));
    }

    #[test]
    fn test_suppression_limit_allows_outlier_removal() {
        // Four balanced records plus one outlier; suppressing 20% is allowed,
        // so the outlier is removed instead of generalizing everyone.
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["bob", "male", "flu"]),
            strings(&["carol", "female", "cold"]),
            strings(&["dave", "male", "cold"]),
            strings(&["erin", "female", "flu"]),
        ];
        let mut request = request(rows, vec![PrivacyModel::KAnonymity { k: 2 }], 0.2);
        // Make the outlier its own class by a distinct hierarchy entry.
        request.attributes[1].hierarchy = Some(vec![
            strings(&["male", "*"]),
            strings(&["female", "*"]),
            strings(&["other", "*"]),
        ]);
        request.rows[4][1] = "other".to_string();

        let solution = search(request).unwrap();
        assert_eq!(solution.generalization_levels[0].level, 0);
        assert_eq!(solution.rows[4], vec![SUPPRESSED; 3]);
        assert_eq!(
            solution.risk_measures[risk::SUPPRESSED_RECORDS_RATIO],
            0.2
        );
    }

    #[test]
    fn test_l_diversity_requires_distinct_sensitive_values() {
        // Each gender class holds a single diagnosis, so l=2 fails without
        // generalization; the merged class after generalizing holds two.
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["carol", "female", "flu"]),
            strings(&["bob", "male", "cold"]),
            strings(&["dave", "male", "cold"]),
        ];
        let solution = search(request(
            rows,
            vec![
                PrivacyModel::KAnonymity { k: 2 },
                PrivacyModel::LDiversity {
                    l: 2,
                    column_name: "diagnosis".to_string(),
                },
            ],
            0.0,
        ))
        .unwrap();
        assert_eq!(solution.generalization_levels[0].level, 1);
    }

    #[test]
    fn test_unknown_sensitive_column_is_an_execution_error() {
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["carol", "female", "cold"]),
        ];
        let err = search(request(
            rows,
            vec![PrivacyModel::LDiversity {
                l: 2,
                column_name: "salary".to_string(),
            }],
            0.0,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("salary"));
    }

    #[tokio::test]
    async fn test_engine_trait_invocation() {
        let engine = LatticeEngine::new();
        let rows = vec![
            strings(&["alice", "female", "flu"]),
            strings(&["carol", "female", "cold"]),
        ];
        let solution = engine
            .anonymize(request(
                rows,
                vec![PrivacyModel::KAnonymity { k: 2 }],
                0.0,
            ))
            .await
            .unwrap();
        assert_eq!(solution.rows.len(), 2);
        assert!(solution
            .risk_measures
            .contains_key(risk::RECORDS_AFFECTED_BY_HIGHEST_PROSECUTOR_RISK));
    }
}

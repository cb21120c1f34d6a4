//! Anonymization result payload
//!
//! Outbound types for the anonymize operation. The payload is created fresh
//! per request, serialized once, and discarded; nothing here is persisted.

use crate::domain::request::{Attribute, AttributeType, PrivacyModel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the returned solution satisfies every declared privacy model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnonymizationStatus {
    Anonymous,
    NotAnonymous,
}

/// Generalization level the engine chose for one attribute
///
/// Level 0 means no generalization was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeGeneralizationEntry {
    /// Column name, echoed from the request
    pub name: String,

    /// Declared role, echoed from the request
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    /// Hierarchy level index actually applied by the engine
    pub generalization_level: usize,
}

/// Metrics describing one anonymization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizationMetrics {
    /// Wall-clock duration of the engine invocation only
    pub process_time_milliseconds: u64,

    /// Privacy models applied to the job, echoed from the request
    pub privacy_models: Vec<PrivacyModel>,

    /// Per-attribute chosen generalization levels, in request attribute order
    pub attribute_generalization: Vec<AttributeGeneralizationEntry>,
}

/// Generalized dataset together with status and metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeResult {
    /// Generalized dataset; header row and row order preserved
    pub data: Vec<Vec<String>>,

    /// Attribute declarations, echoed from the request in original order
    pub attributes: Vec<Attribute>,

    /// Whether every declared privacy model is satisfied
    pub anonymization_status: AnonymizationStatus,

    /// Metrics for this run
    pub metrics: AnonymizationMetrics,
}

/// Quantified re-identification risk for a dataset
///
/// Named measures are defined by the engine/domain convention
/// (e.g. `records_affected_by_highest_prosecutor_risk`) and copied through
/// unmodified. A `BTreeMap` keeps serialization order deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub re_identification_risk: BTreeMap<String, f64>,
}

impl RiskProfile {
    /// Look up a named risk measure
    pub fn measure(&self, name: &str) -> Option<f64> {
        self.re_identification_risk.get(name).copied()
    }
}

/// Root response object for the anonymize operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizationResultPayload {
    pub risk_profile: RiskProfile,
    pub anonymize_result: AnonymizeResult,
    pub created_at: DateTime<Utc>,
}

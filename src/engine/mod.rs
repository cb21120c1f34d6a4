//! Anonymization engine contract
//!
//! The pipeline treats the generalization-search engine as a black box: it
//! hands over the dataset, per-attribute roles and hierarchies, and the set
//! of privacy model constraints, and receives a generalized dataset plus
//! achieved generalization levels, per-model satisfaction flags, and named
//! risk measures. Engines are injected at construction time behind the
//! [`AnonymizationEngine`] trait; [`lattice::LatticeEngine`] is the built-in
//! reference implementation.
//!
//! Input objects are built fresh per request and exclusively owned by one
//! job. Engines must not hold mutable configuration shared across jobs.

pub mod lattice;
pub mod risk;

pub use lattice::LatticeEngine;

use crate::domain::{AttributeType, EngineError, PrivacyModel};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Per-attribute input handed to the engine
#[derive(Debug, Clone)]
pub struct EngineAttribute {
    /// Column name
    pub field: String,

    /// Declared role of the column
    pub attribute_type: AttributeType,

    /// Resolved hierarchy table for quasi-identifying attributes:
    /// one row per source value, columns level 0 (the value) upward
    pub hierarchy: Option<Vec<Vec<String>>>,
}

/// Engine tuning knobs, rebuilt per request
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Fraction of records that may be suppressed to reach compliance (0.0..=1.0)
    pub suppression_limit: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            suppression_limit: 0.0,
        }
    }
}

/// Complete input contract for one engine invocation
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Column names, in dataset order
    pub header: Vec<String>,

    /// Data records, excluding the header row
    pub rows: Vec<Vec<String>>,

    /// One entry per column, in dataset order
    pub attributes: Vec<EngineAttribute>,

    /// Privacy model constraints the solution must satisfy
    pub privacy_models: Vec<PrivacyModel>,

    /// Tuning knobs for this invocation
    pub settings: EngineSettings,
}

/// Generalization level the engine settled on for one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievedLevel {
    pub field: String,
    pub level: usize,
}

/// Satisfaction verdict for one declared privacy model
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    pub model: PrivacyModel,
    pub satisfied: bool,
}

/// Raw engine output for one invocation
#[derive(Debug, Clone)]
pub struct EngineSolution {
    /// Column names, unchanged from the input
    pub header: Vec<String>,

    /// Generalized records, in input row order
    pub rows: Vec<Vec<String>>,

    /// Achieved level per quasi-identifying attribute, in input column order
    pub generalization_levels: Vec<AchievedLevel>,

    /// Verdict per declared privacy model
    pub model_outcomes: Vec<ModelOutcome>,

    /// Named re-identification risk measures for the returned dataset
    pub risk_measures: BTreeMap<String, f64>,
}

impl EngineSolution {
    /// Whether every declared privacy model is satisfied by this solution
    pub fn all_models_satisfied(&self) -> bool {
        self.model_outcomes.iter().all(|outcome| outcome.satisfied)
    }
}

/// Generalization-search engine capability
///
/// Implementations must be safe to share behind `Arc` across concurrent
/// jobs; all per-job state lives in the [`EngineRequest`].
#[async_trait]
pub trait AnonymizationEngine: Send + Sync {
    /// Run the generalization search for one request
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Execution`] when no transformation satisfies
    /// every privacy model, or on any internal engine fault. Failure to find
    /// a solution is an error, never a default or empty output.
    async fn anonymize(&self, request: EngineRequest) -> Result<EngineSolution, EngineError>;
}

//! Anonymization pipeline facade
//!
//! Wires the validator, hierarchy resolver, orchestrator, and result
//! translator into the single inbound anonymize operation. Every entity the
//! pipeline touches is request-scoped; the service itself holds only the
//! injected engine capability and its concurrency limits and can be shared
//! across concurrent requests.

use crate::config::EngineConfig;
use crate::core::hierarchy;
use crate::core::orchestrate::AnonymizationOrchestrator;
use crate::core::translate;
use crate::core::validate;
use crate::domain::{
    AnonymizationRequest, AnonymizationResultPayload, Result, RiskProfile, ValidationError,
};
use crate::engine::{risk, AnonymizationEngine, LatticeEngine};
use std::sync::Arc;

/// The anonymize operation, end to end
pub struct AnonymizationService {
    orchestrator: AnonymizationOrchestrator,
}

impl AnonymizationService {
    /// Create a service around an injected engine capability
    pub fn new(engine: Arc<dyn AnonymizationEngine>, config: &EngineConfig) -> Self {
        Self {
            orchestrator: AnonymizationOrchestrator::new(engine, config),
        }
    }

    /// Create a service backed by the built-in lattice engine
    pub fn with_default_engine(config: &EngineConfig) -> Self {
        Self::new(Arc::new(LatticeEngine::new()), config)
    }

    /// Anonymize a dataset according to its declared privacy policy
    ///
    /// Runs validation, hierarchy resolution, the engine invocation, and
    /// result translation in order. The first failure short-circuits; no
    /// engine invocation happens for an invalid request, and no partial
    /// payload is ever returned.
    pub async fn anonymize(
        &self,
        request: &AnonymizationRequest,
    ) -> Result<AnonymizationResultPayload> {
        validate::validate(request)?;
        let hierarchies = hierarchy::resolve(request)?;

        tracing::info!(
            records = request.record_count(),
            attributes = request.attributes.len(),
            quasi_identifiers = hierarchies.len(),
            privacy_models = request.privacy_models.len(),
            "Dispatching anonymization job"
        );

        let timed = self.orchestrator.run(request, &hierarchies).await?;
        let payload = translate::translate(request, &timed);

        tracing::info!(
            status = ?payload.anonymize_result.anonymization_status,
            process_time_ms = payload.anonymize_result.metrics.process_time_milliseconds,
            "Anonymization job complete"
        );

        Ok(payload)
    }
}

/// Re-identification risk profile of a dataset as declared, without
/// anonymizing it
///
/// Useful to quantify the baseline risk before deciding on a privacy
/// policy. Requires only the dataset and attribute declarations; privacy
/// models and hierarchies play no part.
pub fn assess_risk(request: &AnonymizationRequest) -> Result<RiskProfile> {
    if request.data.is_empty() {
        return Err(ValidationError::MissingData.into());
    }
    if request.attributes.is_empty() {
        return Err(ValidationError::MissingAttributes.into());
    }
    let expected = request.attributes.len();
    for (row, values) in request.data.iter().enumerate() {
        if values.len() != expected {
            return Err(ValidationError::ColumnMismatch {
                row,
                expected,
                found: values.len(),
            }
            .into());
        }
    }

    let quasi_columns: Vec<usize> = request
        .attributes
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_quasi_identifying())
        .map(|(column, _)| column)
        .collect();
    let records = &request.data[1..];
    let class_sizes = risk::equivalence_class_sizes(records, &quasi_columns);

    Ok(RiskProfile {
        re_identification_risk: risk::prosecutor_risk_measures(&class_sizes, 0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attribute, AttributeType, CloakError, PrivacyModel};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn request() -> AnonymizationRequest {
        AnonymizationRequest {
            data: vec![
                strings(&["gender", "diagnosis"]),
                strings(&["male", "flu"]),
                strings(&["male", "cold"]),
                strings(&["female", "flu"]),
            ],
            attributes: vec![
                Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
                    .with_hierarchy(vec![strings(&["male", "*"]), strings(&["female", "*"])]),
                Attribute::new("diagnosis", AttributeType::SensitiveAttribute),
            ],
            privacy_models: vec![PrivacyModel::KAnonymity { k: 2 }],
        }
    }

    #[test]
    fn test_assess_risk_on_raw_dataset() {
        let profile = assess_risk(&request()).unwrap();
        // Classes: male of 2, female of 1.
        assert_eq!(profile.measure(risk::HIGHEST_PROSECUTOR_RISK), Some(1.0));
        assert_eq!(
            profile.measure(risk::RECORDS_AFFECTED_BY_HIGHEST_PROSECUTOR_RISK),
            Some(1.0 / 3.0)
        );
    }

    #[test]
    fn test_assess_risk_requires_data() {
        let mut empty = request();
        empty.data.clear();
        assert!(matches!(
            assess_risk(&empty),
            Err(CloakError::Validation(ValidationError::MissingData))
        ));
    }

    #[test]
    fn test_assess_risk_requires_matching_arity() {
        let mut ragged = request();
        ragged.data[1].pop();
        assert!(matches!(
            assess_risk(&ragged),
            Err(CloakError::Validation(ValidationError::ColumnMismatch { .. }))
        ));
    }
}

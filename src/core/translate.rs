//! Result translation
//!
//! Structural mapping from the engine's raw solution to the externally
//! visible result payload. Nothing is recomputed here: rows are copied in
//! engine order, attribute declarations are echoed from the request, the
//! status reflects the engine's per-model verdicts, and risk measures pass
//! through unmodified.

use crate::core::orchestrate::TimedSolution;
use crate::domain::{
    AnonymizationMetrics, AnonymizationRequest, AnonymizationResultPayload, AnonymizationStatus,
    AnonymizeResult, AttributeGeneralizationEntry, RiskProfile,
};
use chrono::Utc;
use std::collections::HashMap;

/// Build the response payload for one completed job
pub fn translate(
    request: &AnonymizationRequest,
    timed: &TimedSolution,
) -> AnonymizationResultPayload {
    let solution = &timed.solution;

    let status = if solution.all_models_satisfied() {
        AnonymizationStatus::Anonymous
    } else {
        AnonymizationStatus::NotAnonymous
    };

    // Levels keyed by field; entries are emitted in request attribute order.
    let levels: HashMap<&str, usize> = solution
        .generalization_levels
        .iter()
        .map(|achieved| (achieved.field.as_str(), achieved.level))
        .collect();
    let attribute_generalization: Vec<AttributeGeneralizationEntry> = request
        .attributes
        .iter()
        .filter_map(|attribute| {
            levels
                .get(attribute.field.as_str())
                .map(|&level| AttributeGeneralizationEntry {
                    name: attribute.field.clone(),
                    attribute_type: attribute.attribute_type_model,
                    generalization_level: level,
                })
        })
        .collect();

    let mut data = Vec::with_capacity(solution.rows.len() + 1);
    data.push(solution.header.clone());
    data.extend(solution.rows.iter().cloned());

    AnonymizationResultPayload {
        risk_profile: RiskProfile {
            re_identification_risk: solution.risk_measures.clone(),
        },
        anonymize_result: AnonymizeResult {
            data,
            attributes: request.attributes.clone(),
            anonymization_status: status,
            metrics: AnonymizationMetrics {
                process_time_milliseconds: timed.process_time.as_millis() as u64,
                privacy_models: request.privacy_models.clone(),
                attribute_generalization,
            },
        },
        created_at: Utc::now(),
    }
}

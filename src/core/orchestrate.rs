//! Engine orchestration
//!
//! Configures and invokes the anonymization engine for one validated
//! request: builds a fresh engine input, bounds concurrent invocations with
//! a semaphore, runs the call under a wall-clock budget, and measures the
//! elapsed time of the engine call alone. Validation and serialization
//! never count toward the reported processing time.

use crate::config::EngineConfig;
use crate::core::hierarchy::ResolvedHierarchy;
use crate::domain::{AnonymizationRequest, EngineError};
use crate::engine::{
    AnonymizationEngine, EngineAttribute, EngineRequest, EngineSettings, EngineSolution,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Engine output together with the measured invocation time
#[derive(Debug)]
pub struct TimedSolution {
    pub solution: EngineSolution,
    pub process_time: Duration,
}

/// Dispatches anonymization jobs to the engine
///
/// The engine capability is injected at construction time; a fresh
/// [`EngineRequest`] is built per job so no engine configuration is ever
/// shared or mutated across concurrent requests.
pub struct AnonymizationOrchestrator {
    engine: Arc<dyn AnonymizationEngine>,
    limiter: Arc<Semaphore>,
    timeout: Duration,
    suppression_limit: f64,
}

impl AnonymizationOrchestrator {
    /// Create an orchestrator around an engine capability
    pub fn new(engine: Arc<dyn AnonymizationEngine>, config: &EngineConfig) -> Self {
        Self {
            engine,
            limiter: Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1))),
            timeout: Duration::from_secs(config.timeout_seconds),
            suppression_limit: config.suppression_limit,
        }
    }

    /// Run one anonymization job
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::Execution`] from the engine and surfaces
    /// [`EngineError::Timeout`] when the configured budget is exceeded, in
    /// which case the invocation is abandoned and partial results discarded.
    pub async fn run(
        &self,
        request: &AnonymizationRequest,
        hierarchies: &[ResolvedHierarchy],
    ) -> Result<TimedSolution, EngineError> {
        let engine_request = build_engine_request(request, hierarchies, self.suppression_limit)?;

        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| EngineError::Execution("engine worker pool is closed".to_string()))?;

        let job_id = Uuid::new_v4();
        tracing::debug!(
            job_id = %job_id,
            records = engine_request.rows.len(),
            quasi_identifiers = hierarchies.len(),
            "Invoking anonymization engine"
        );

        // The timer brackets the engine call only; permit acquisition and
        // input construction happen before it starts.
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.engine.anonymize(engine_request)).await;
        let process_time = started.elapsed();

        match outcome {
            Err(_) => {
                tracing::warn!(
                    job_id = %job_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Engine timed out"
                );
                Err(EngineError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
            Ok(Err(e)) => Err(e),
            Ok(Ok(solution)) => Ok(TimedSolution {
                solution,
                process_time,
            }),
        }
    }
}

fn build_engine_request(
    request: &AnonymizationRequest,
    hierarchies: &[ResolvedHierarchy],
    suppression_limit: f64,
) -> Result<EngineRequest, EngineError> {
    let (header, rows) = request
        .data
        .split_first()
        .ok_or_else(|| EngineError::Execution("dataset has no header row".to_string()))?;

    let attributes = request
        .attributes
        .iter()
        .map(|attribute| EngineAttribute {
            field: attribute.field.clone(),
            attribute_type: attribute.attribute_type_model,
            hierarchy: hierarchies
                .iter()
                .find(|h| h.field == attribute.field)
                .map(|h| h.rows.clone()),
        })
        .collect();

    Ok(EngineRequest {
        header: header.clone(),
        rows: rows.to_vec(),
        attributes,
        privacy_models: request.privacy_models.clone(),
        settings: EngineSettings { suppression_limit },
    })
}

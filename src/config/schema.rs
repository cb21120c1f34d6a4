//! Configuration schema

use crate::domain::{CloakError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration for the cloak binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloakConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name, used in logging
    #[serde(default = "default_application_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Anonymization engine limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock budget per engine invocation, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Upper bound on engine invocations running at once
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    /// Fraction of records the engine may suppress to reach compliance
    #[serde(default)]
    pub suppression_limit: f64,
}

/// Local logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling-file JSON logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily or hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

fn default_application_name() -> String {
    "cloak".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_concurrent_jobs() -> usize {
    4
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_application_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
            suppression_limit: 0.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl CloakConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.engine.timeout_seconds == 0 {
            return Err(CloakError::Configuration(
                "engine.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.engine.max_concurrent_jobs == 0 {
            return Err(CloakError::Configuration(
                "engine.max_concurrent_jobs must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.engine.suppression_limit) {
            return Err(CloakError::Configuration(format!(
                "engine.suppression_limit must be within 0.0..=1.0, got {}",
                self.engine.suppression_limit
            )));
        }
        if !matches!(self.logging.local_rotation.as_str(), "daily" | "hourly") {
            return Err(CloakError::Configuration(format!(
                "logging.local_rotation must be 'daily' or 'hourly', got '{}'",
                self.logging.local_rotation
            )));
        }
        if !matches!(
            self.application.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(CloakError::Configuration(format!(
                "application.log_level must be one of trace, debug, info, warn, error, got '{}'",
                self.application.log_level
            )));
        }
        Ok(())
    }
}

//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution and `CLOAK_*`
//! environment overrides. Configuration only shapes the boundary (engine
//! limits, logging); the core pipeline itself reads nothing from the
//! environment.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ApplicationConfig, CloakConfig, EngineConfig, LoggingConfig};

// Cloak - Dataset Anonymization Service
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

//! # Cloak - Dataset Anonymization Service
//!
//! Cloak accepts a dataset together with a declared privacy policy
//! (attribute roles and privacy models such as k-anonymity) and produces an
//! anonymized version of the dataset, a quantified re-identification risk
//! profile, and generalization metrics.
//!
//! ## Architecture
//!
//! Cloak follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (validation, hierarchy resolution, engine
//!   orchestration, result translation, error reporting)
//! - [`engine`] - Anonymization engine contract and the built-in lattice
//!   search engine
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloak::config::EngineConfig;
//! use cloak::core::AnonymizationService;
//! use cloak::domain::{AnonymizationRequest, Attribute, AttributeType, PrivacyModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = AnonymizationRequest {
//!         data: vec![
//!             vec!["gender".into()],
//!             vec!["male".into()],
//!             vec!["female".into()],
//!         ],
//!         attributes: vec![
//!             Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
//!                 .with_hierarchy(vec![
//!                     vec!["male".into(), "*".into()],
//!                     vec!["female".into(), "*".into()],
//!                 ]),
//!         ],
//!         privacy_models: vec![PrivacyModel::KAnonymity { k: 2 }],
//!     };
//!
//!     let service = AnonymizationService::with_default_engine(&EngineConfig::default());
//!     let payload = service.anonymize(&request).await?;
//!
//!     println!("{:?}", payload.anonymize_result.anonymization_status);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Cloak uses the [`domain::CloakError`] type for all errors. Validation
//! failures and engine failures are ordinary return values; the
//! [`core::ExceptionResponse`] reporter maps them to the structured error
//! response handed to the boundary layer.
//!
//! ## Logging
//!
//! Cloak uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(records = 1200, "Dispatching anonymization job");
//! warn!(timeout_ms = 30_000u64, "Engine timed out");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod engine;
pub mod logging;

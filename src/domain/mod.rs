//! Core domain types and models
//!
//! This module contains the wire-facing request/response models for the
//! anonymize operation, the domain error hierarchy, and the crate-wide
//! `Result` alias.

pub mod errors;
pub mod request;
pub mod response;
pub mod result;

pub use errors::{CloakError, EngineError, HierarchyError, ValidationError};
pub use request::{AnonymizationRequest, Attribute, AttributeType, PrivacyModel};
pub use response::{
    AnonymizationMetrics, AnonymizationResultPayload, AnonymizationStatus, AnonymizeResult,
    AttributeGeneralizationEntry, RiskProfile,
};
pub use result::Result;

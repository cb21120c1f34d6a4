//! Business logic for the anonymize operation
//!
//! The pipeline runs validation, hierarchy resolution, engine orchestration,
//! and result translation in order, with error reporting short-circuiting at
//! the first failure:
//!
//! ```text
//! validate -> hierarchy -> orchestrate -> translate
//!      \__________\____________\______ report
//! ```

pub mod hierarchy;
pub mod orchestrate;
pub mod report;
pub mod service;
pub mod translate;
pub mod validate;

pub use report::{ExceptionResponse, RejectionKind};
pub use service::{assess_risk, AnonymizationService};

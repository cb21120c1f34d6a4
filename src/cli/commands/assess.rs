//! Assess command implementation
//!
//! Quantifies the baseline re-identification risk of a dataset as declared,
//! without invoking the anonymization engine.

use crate::cli::commands::read_request;
use crate::core::{assess_risk, ExceptionResponse};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the assess command
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Path to the JSON request document
    #[arg(short, long)]
    pub request: PathBuf,
}

impl AssessArgs {
    /// Execute the assess command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let request = read_request(&self.request)?;

        tracing::info!(
            request = %self.request.display(),
            records = request.record_count(),
            "Assessing re-identification risk"
        );

        match assess_risk(&request) {
            Ok(profile) => {
                println!("{}", serde_json::to_string_pretty(&profile)?);
                Ok(0)
            }
            Err(e) => {
                let response = ExceptionResponse::from(&e);
                eprintln!("{}", serde_json::to_string(&response)?);
                Ok(1)
            }
        }
    }
}

//! Anonymize command implementation
//!
//! Runs the full pipeline on a JSON request document and prints the result
//! payload. Rejections are reported as the structured error response on
//! stderr with a distinguishing exit code.

use crate::cli::commands::{load_or_default, read_request};
use crate::core::{AnonymizationService, ExceptionResponse, RejectionKind};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Path to the JSON request document
    #[arg(short, long)]
    pub request: PathBuf,

    /// Write the result payload to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON payload
    #[arg(long)]
    pub pretty: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_or_default(config_path)?;
        let request = read_request(&self.request)?;

        tracing::info!(
            request = %self.request.display(),
            records = request.record_count(),
            "Starting anonymization"
        );

        let service = AnonymizationService::with_default_engine(&config.engine);
        match service.anonymize(&request).await {
            Ok(payload) => {
                let json = if self.pretty {
                    serde_json::to_string_pretty(&payload)?
                } else {
                    serde_json::to_string(&payload)?
                };
                match &self.output {
                    Some(path) => {
                        std::fs::write(path, json)?;
                        println!("Result payload written to {}", path.display());
                    }
                    None => println!("{json}"),
                }
                Ok(0)
            }
            Err(e) => {
                let response = ExceptionResponse::from(&e);
                eprintln!("{}", serde_json::to_string(&response)?);
                Ok(match response.kind {
                    RejectionKind::InvalidRequest => 1,
                    RejectionKind::EngineFailure => 3,
                    RejectionKind::EngineTimeout => 4,
                })
            }
        }
    }
}

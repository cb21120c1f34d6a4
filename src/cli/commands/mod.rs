//! Command implementations

pub mod anonymize;
pub mod assess;
pub mod init;
pub mod validate;

use crate::config::{load_config, CloakConfig};
use crate::domain::AnonymizationRequest;
use std::path::Path;

/// Load configuration, falling back to defaults when no file exists
///
/// Commands that run jobs work out of the box without a config file;
/// `validate-config` insists on one.
pub(crate) fn load_or_default(config_path: &str) -> anyhow::Result<CloakConfig> {
    if Path::new(config_path).exists() {
        Ok(load_config(config_path)?)
    } else {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        Ok(CloakConfig::default())
    }
}

/// Read and parse a JSON request document
pub(crate) fn read_request(path: &Path) -> anyhow::Result<AnonymizationRequest> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read request file {}: {e}", path.display()))?;
    let request = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse request JSON: {e}"))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_or_default_without_file() {
        let config = load_or_default("definitely-not-there.toml").unwrap();
        assert_eq!(config.engine.timeout_seconds, 30);
    }

    #[test]
    fn test_read_request_rejects_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"not json").unwrap();
        temp_file.flush().unwrap();
        assert!(read_request(temp_file.path()).is_err());
    }
}

//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::deployment::{Deployment, DEFAULT_PACKAGE_ID, MODULE_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid package id: {0}")]
    InvalidPackageId(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a CollabSplit client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the ledger client.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Package id of the deployed split contract.
    #[serde(default = "default_package_id")]
    pub package_id: String,

    /// Module holding the split entry points.
    #[serde(default = "default_module")]
    pub module: String,

    /// Gas budget attached to every transaction. Left to the ledger client when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:9000".to_string()
}

fn default_package_id() -> String {
    DEFAULT_PACKAGE_ID.to_string()
}

fn default_module() -> String {
    MODULE_NAME.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The contract deployment this configuration points at.
    pub fn deployment(&self) -> Result<Deployment, ConfigError> {
        Deployment::new(&self.package_id, self.module.as_str())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            package_id: default_package_id(),
            module: default_module(),
            gas_budget: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.package_id, DEFAULT_PACKAGE_ID);
        assert_eq!(config.module, "split");
        assert_eq!(config.gas_budget, None);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rpc_url = "http://wallet-bridge:9000"
            package_id = "0x2"
            gas_budget = 50000000
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rpc_url, "http://wallet-bridge:9000");
        assert_eq!(config.gas_budget, Some(50_000_000));
        assert_eq!(config.log_level, "info"); // default

        let deployment = config.deployment().unwrap();
        assert!(deployment.package_id().ends_with("0002"));
    }

    #[test]
    fn invalid_package_id_surfaces_on_deployment() {
        let config = ClientConfig::from_toml_str(r#"package_id = "nope""#).unwrap();
        assert!(matches!(
            config.deployment(),
            Err(ConfigError::InvalidPackageId(_))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ClientConfig::from_toml_str("gas_budget = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        let config = ClientConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = ClientConfig::from_toml_file("/nonexistent/collabsplit.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

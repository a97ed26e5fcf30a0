//! Batcher configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::{BatcherError, LogFormat};

/// Configuration for the batcher's encoded blob store and its surroundings.
///
/// Can be loaded from a TOML file via [`BatcherConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatcherConfig {
    /// Stop admitting encoding work once the held results reach this many bytes.
    #[serde(default = "default_max_encoded_result_bytes")]
    pub max_encoded_result_bytes: u64,

    /// Stop admitting encoding work once this many results are held.
    #[serde(default = "default_max_encoded_results")]
    pub max_encoded_results: usize,

    /// Footprint at which a batch should be assembled without waiting for the
    /// next block. Zero disables the notification.
    #[serde(default)]
    pub encoded_size_threshold: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to publish Prometheus metrics for the store.
    #[serde(default)]
    pub enable_metrics: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_encoded_result_bytes() -> u64 {
    4 * 1024 * 1024 * 1024
}

fn default_max_encoded_results() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BatcherConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, BatcherError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BatcherError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BatcherError> {
        toml::from_str(s).map_err(|e| BatcherError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, BatcherError> {
        toml::to_string_pretty(self).map_err(|e| BatcherError::Config(e.to_string()))
    }
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self {
            max_encoded_result_bytes: default_max_encoded_result_bytes(),
            max_encoded_results: default_max_encoded_results(),
            encoded_size_threshold: 0,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            enable_metrics: false,
        }
    }
}

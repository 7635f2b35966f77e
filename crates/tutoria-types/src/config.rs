//! Configuration types for the tutoring session manager.
//!
//! Loaded from `config.toml` by tutoria-infra; every field has a default so
//! a missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            budget: BudgetConfig::default(),
        }
    }
}

/// Chat backend endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the chat backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport-level timeout for one round trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Context budget applied when assembling a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Maximum number of history messages sent with one request.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
    /// Maximum total characters of history sent with one request.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            max_chars: default_max_chars(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_messages() -> usize {
    12
}

fn default_max_chars() -> usize {
    8_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TutorConfig::default();
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.budget.max_messages, 12);
        assert_eq!(config.budget.max_chars, 8_000);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let json = r#"{"budget": {"max_messages": 4}}"#;
        let config: TutorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.budget.max_messages, 4);
        assert_eq!(config.budget.max_chars, 8_000);
        assert_eq!(config.backend.base_url, "http://localhost:8787");
    }
}

//! Global configuration types for Stepwise.
//!
//! `GlobalConfig` represents the top-level `config.toml` that selects the
//! completion model and, optionally, an alternate endpoint base URL.

use serde::{Deserialize, Serialize};

/// Top-level configuration for Stepwise.
///
/// Loaded from `~/.stepwise/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model identifier embedded in the completion endpoint URL.
    #[serde(default = "default_model")]
    pub model: String,

    /// Override the default endpoint base URL (proxies, testing).
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
        }
    }
}

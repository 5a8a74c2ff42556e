//! Hosted function endpoint configuration.
//!
//! The platform exposes serverless function endpoints; the only one this
//! workspace calls is the affect-override classifier.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FunctionsConfig {
    /// Function endpoint base URL (e.g. `https://project.functions.example.com`).
    #[serde(default)]
    pub base_url: String,

    /// Service key sent as a bearer token.
    #[serde(default)]
    pub service_key: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            service_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FunctionsConfig {
    /// Check if the minimum fields for invoking a function are present.
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.service_key.is_empty()
    }

    /// Full URL for a named function.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }
}

//! Environment-driven configuration.

use serde::Deserialize;

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_url() -> String {
    crate::unipa::SEARCH_URL.to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

/// Runtime configuration, extracted from the environment with figment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base log level for this crate's targets (overridable via `RUST_LOG`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upstream search page. Defaults to the production catalog; tests point
    /// this at a local stub.
    #[serde(default = "default_search_url")]
    pub unipa_search_url: String,
    /// Upstream request timeout, in seconds.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout: u64,
}

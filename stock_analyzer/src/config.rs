//! Analyzer configuration: TOML parsing and loading.
//!
//! Everything has a built-in default, so a missing file, an empty file and a
//! file that only overrides one field all work. Unknown keys are rejected
//! rather than ignored; a typo in a config should fail loudly.
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_config_str`]
//! - Parse from a file path: [`load_config_path`]
//! - Pick the path from a CLI flag or the environment: [`resolve_config_path`]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use market_data_client::providers::yahoo_chart::ClientOptions;
use news_aggregator::sources::syndication::{DEFAULT_FEED_BASE_URL, FeedOptions};
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var;
use toml::from_str;

/// Environment variable naming a config file, used when no flag is given.
pub const CONFIG_PATH_ENV: &str = "STOCK_ANALYZER_CONFIG";

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalyzerConfig {
    /// HTTP client behavior shared by all outbound calls.
    pub network: NetworkConfig,
    /// Upstream endpoints, overridable for mirrors and local stubs.
    pub endpoints: EndpointConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct NetworkConfig {
    /// User agent presented to every upstream.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Outbound request budget per second against the market data API.
    pub max_requests_per_sec: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let client = ClientOptions::default();
        Self {
            user_agent: client.user_agent,
            timeout_secs: client.timeout.as_secs(),
            max_requests_per_sec: client.max_requests_per_sec,
        }
    }
}

/// Upstream service endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct EndpointConfig {
    /// Market data API, scheme and host without a trailing slash.
    pub chart_base_url: String,
    /// Syndicated news search feed.
    pub feed_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            chart_base_url: ClientOptions::default().base_url,
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Connection options for the market data provider.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.endpoints.chart_base_url.clone(),
            user_agent: self.network.user_agent.clone(),
            timeout: Duration::from_secs(self.network.timeout_secs),
            max_requests_per_sec: self.network.max_requests_per_sec,
        }
    }

    /// Connection options for the syndicated feed source.
    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            base_url: self.endpoints.feed_base_url.clone(),
            user_agent: self.network.user_agent.clone(),
            timeout: Duration::from_secs(self.network.timeout_secs),
        }
    }
}

/// Parses a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AnalyzerConfig> {
    from_str(toml_str).context("failed to parse analyzer config TOML")
}

/// Reads and parses a configuration file from disk.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AnalyzerConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

/// Picks the config file to use: an explicit flag wins, otherwise the
/// [`CONFIG_PATH_ENV`] variable, otherwise none (built-in defaults).
pub fn resolve_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| get_env_var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
}

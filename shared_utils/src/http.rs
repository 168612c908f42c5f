//! Defaults for outbound HTTP calls.
//!
//! Both the market-data client and the news syndication client talk to
//! public endpoints that reject obvious bot traffic, so every request goes
//! out with a realistic browser user-agent and a bounded timeout. The
//! constants live here so the two crates cannot drift apart.

use std::time::Duration;

/// Browser user-agent presented on every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The default timeout as a [`Duration`].
pub fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

// ── Session configuration ──
//
// Describes *how* to reach the monitoring service. The CLI builds a
// `SessionConfig` from its config file and flags and hands it in; core
// never reads config files itself.

use std::time::Duration;

use url::Url;

/// Configuration for one service session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the monitoring service (e.g., `http://127.0.0.1:8000`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".parse().unwrap(),
            timeout: Duration::from_secs(30),
        }
    }
}

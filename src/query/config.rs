//! Configuration for the update server query.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the instance check request is built and retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// URL scheme, `https` in production
    pub scheme: String,
    /// Explicit port; the scheme default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Request path on the update server
    pub path: String,
    /// Timeout for a single attempt
    pub timeout_ms: u64,
    /// Attempts per address, counting the first one
    pub max_attempts: u32,
    /// Pause between attempts after a timeout
    pub retry_delay_ms: u64,
    /// Skip TLS certificate validation. The update server is trusted by its
    /// network position, not by its certificate chain.
    pub accept_invalid_certs: bool,
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            port: None,
            path: "/api/instance/check".to_string(),
            timeout_ms: 2000,
            max_attempts: 3,
            retry_delay_ms: 1000,
            accept_invalid_certs: true,
        }
    }
}

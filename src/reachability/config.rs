//! Configuration for connectivity probing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Targets used to decide whether IPv4 / IPv6 connectivity exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachabilityConfig {
    /// `host:port` probed over IPv4
    pub ipv4_target: String,
    /// `[host]:port` probed over IPv6
    pub ipv6_target: String,
    /// Connect timeout for each probe
    pub timeout_ms: u64,
}

impl ReachabilityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            ipv4_target: "8.8.8.8:443".to_string(),
            ipv6_target: "[2001:4860:4860::8888]:443".to_string(),
            timeout_ms: 2000,
        }
    }
}

//! Network reachability probing.
//!
//! The decision pipeline only talks to an update server when the instance
//! has IPv4 or IPv6 connectivity; this module answers that question.

mod config;

pub use config::ReachabilityConfig;

use async_trait::async_trait;
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// Which address families can reach the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Connectivity {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl Connectivity {
    pub fn any(&self) -> bool {
        self.ipv4 || self.ipv6
    }
}

/// Connectivity oracle used by the decision pipeline.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn has_ipv4(&self) -> bool;

    async fn has_ipv6(&self) -> bool;

    /// Probe both families, IPv4 first.
    async fn connectivity(&self) -> Connectivity {
        Connectivity {
            ipv4: self.has_ipv4().await,
            ipv6: self.has_ipv6().await,
        }
    }
}

/// Probes connectivity with a TCP connect to a well-known target per family.
pub struct SocketProbe {
    ipv4_target: Option<SocketAddr>,
    ipv6_target: Option<SocketAddr>,
    timeout: Duration,
}

impl SocketProbe {
    pub fn new(config: &ReachabilityConfig) -> Self {
        Self {
            ipv4_target: parse_target(&config.ipv4_target),
            ipv6_target: parse_target(&config.ipv6_target),
            timeout: config.timeout(),
        }
    }

    async fn probe(&self, target: Option<SocketAddr>) -> bool {
        let Some(target) = target else {
            return false;
        };

        match tokio::time::timeout(self.timeout, TcpStream::connect(target)).await {
            Ok(Ok(_)) => {
                tracing::debug!(probe_target = %target, "Reachability probe succeeded");
                true
            }
            Ok(Err(e)) => {
                tracing::debug!(probe_target = %target, error = %e, "Reachability probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(
                    probe_target = %target,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Reachability probe timed out"
                );
                false
            }
        }
    }
}

fn parse_target(target: &str) -> Option<SocketAddr> {
    match target.parse() {
        Ok(addr) => Some(addr),
        Err(e) => {
            tracing::warn!(probe_target = target, error = %e, "Invalid reachability probe target");
            None
        }
    }
}

#[async_trait]
impl Reachability for SocketProbe {
    async fn has_ipv4(&self) -> bool {
        self.probe(self.ipv4_target.filter(SocketAddr::is_ipv4)).await
    }

    async fn has_ipv6(&self) -> bool {
        self.probe(self.ipv6_target.filter(SocketAddr::is_ipv6)).await
    }
}

/// Fixed answer, for wiring and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticReachability(pub Connectivity);

#[async_trait]
impl Reachability for StaticReachability {
    async fn has_ipv4(&self) -> bool {
        self.0.ipv4
    }

    async fn has_ipv6(&self) -> bool {
        self.0.ipv6
    }
}

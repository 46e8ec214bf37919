//! Update server address resolution.
//!
//! Addresses of the update server the instance is registered with are taken
//! from the hosts file. A freshly registered instance has no such entry yet;
//! in that case an optional [`AddressFallbackSource`] is asked for the server
//! it would register with.

pub mod parser;

use crate::command;
use crate::config::{FlavorCheckConfig, RegistrationConfig};
use crate::reachability::Connectivity;
use async_trait::async_trait;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Update server addresses reported by a registration-aware source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredServer {
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

/// Capability to look up the update server when the hosts file has none.
#[async_trait]
pub trait AddressFallbackSource: Send + Sync {
    async fn registered_server(&self) -> Option<RegisteredServer>;
}

/// Fallback source backed by an external command.
///
/// The first IPv4 and the first IPv6 literal among the whitespace separated
/// tokens of the command's output are used.
#[derive(Debug, Clone)]
pub struct CommandFallbackSource {
    command_line: String,
}

impl CommandFallbackSource {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }

    /// Source for the configured fallback command, if any.
    pub fn from_config(config: &RegistrationConfig) -> Option<Self> {
        config
            .fallback_command
            .as_deref()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
            .map(Self::new)
    }
}

/// Pick the first IPv4 and IPv6 address out of free-form output.
pub fn parse_registered_server(output: &str) -> RegisteredServer {
    let mut server = RegisteredServer::default();

    for token in output.split_whitespace() {
        match parser::parse_ip(token) {
            Some(IpAddr::V4(ip)) if server.ipv4.is_none() => server.ipv4 = Some(ip.to_string()),
            Some(IpAddr::V6(ip)) if server.ipv6.is_none() => server.ipv6 = Some(ip.to_string()),
            _ => {}
        }
    }

    server
}

#[async_trait]
impl AddressFallbackSource for CommandFallbackSource {
    async fn registered_server(&self) -> Option<RegisteredServer> {
        match command::run(&self.command_line).await {
            Ok(output) => {
                let server = parse_registered_server(&output);
                if server.ipv4.is_none() && server.ipv6.is_none() {
                    tracing::warn!(
                        command = %self.command_line,
                        "Registration fallback reported no update server address"
                    );
                    return None;
                }
                Some(server)
            }
            Err(e) => {
                tracing::error!(error = %e, "Registration fallback command failed");
                None
            }
        }
    }
}

/// Produces the ordered candidate update server addresses.
#[derive(Clone)]
pub struct AddressResolver {
    hosts_path: PathBuf,
    domain: String,
    fallback: Option<Arc<dyn AddressFallbackSource>>,
}

impl AddressResolver {
    pub fn new(hosts_path: impl Into<PathBuf>, domain: impl Into<String>) -> Self {
        Self {
            hosts_path: hosts_path.into(),
            domain: domain.into(),
            fallback: None,
        }
    }

    /// Resolver for `config`, with the command fallback source when one is configured.
    pub fn from_config(config: &FlavorCheckConfig) -> Self {
        let resolver = Self::new(&config.paths.hosts, &config.registration.domain);
        match CommandFallbackSource::from_config(&config.registration) {
            Some(source) => resolver.with_fallback(Arc::new(source)),
            None => resolver,
        }
    }

    /// Attach a registration-aware fallback source.
    pub fn with_fallback(mut self, fallback: Arc<dyn AddressFallbackSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Candidate addresses, registered server first. May be empty.
    pub async fn resolve(&self, connectivity: Connectivity) -> Vec<String> {
        let mut addresses = self.hosts_addresses();

        if addresses.is_empty() {
            if let Some(fallback) = &self.fallback {
                addresses = self.fallback_addresses(fallback.as_ref(), connectivity).await;
            }
        }

        if addresses.is_empty() {
            tracing::info!("Could not determine update server IP address");
        } else {
            tracing::debug!(?addresses, "Resolved update server addresses");
        }

        addresses
    }

    /// Addresses recorded in the hosts file for the registration domain.
    pub fn hosts_addresses(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.hosts_path) {
            Ok(content) => parser::hosts_addresses(&content, &self.domain),
            Err(e) => {
                tracing::error!(
                    path = %self.hosts_path.display(),
                    error = %e,
                    "Could not open hosts file"
                );
                Vec::new()
            }
        }
    }

    async fn fallback_addresses(
        &self,
        fallback: &dyn AddressFallbackSource,
        connectivity: Connectivity,
    ) -> Vec<String> {
        let Some(server) = fallback.registered_server().await else {
            return Vec::new();
        };

        let mut addresses = Vec::new();
        if connectivity.ipv6 {
            if let Some(ipv6) = server.ipv6.as_deref() {
                match parser::parse_ip(ipv6) {
                    Some(IpAddr::V6(ip)) => addresses.push(format!("[{}]", ip)),
                    _ => tracing::warn!(address = ipv6, "Ignoring invalid IPv6 update server address"),
                }
            }
        }
        if connectivity.ipv4 {
            if let Some(ipv4) = server.ipv4.as_deref() {
                match parser::parse_ip(ipv4) {
                    Some(IpAddr::V4(_)) => addresses.push(ipv4.trim().to_string()),
                    _ => tracing::warn!(address = ipv4, "Ignoring invalid IPv4 update server address"),
                }
            }
        }

        addresses
    }
}

//! Outbound proxy resolution.
//!
//! Proxy variables in the process environment take precedence: the query
//! then leaves proxying to the HTTP client's own environment handling.
//! Otherwise the system proxy config file decides.

pub mod parser;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variables that make the environment authoritative for proxying.
pub const PROXY_ENV_VARS: [&str; 8] = [
    "http_proxy",
    "https_proxy",
    "no_proxy",
    "all_proxy",
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "NO_PROXY",
    "ALL_PROXY",
];

/// Proxy endpoints taken from the proxy config file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxyEndpoints {
    pub http: Option<String>,
    pub https: Option<String>,
    pub no_proxy: Option<String>,
}

/// How outbound requests are proxied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxySettings {
    /// Defer to proxy variables in the environment
    Environment,
    /// Use these endpoints, ignoring the environment
    Explicit(ProxyEndpoints),
    /// Connect directly
    Disabled,
}

/// Decides [`ProxySettings`] from the environment and the proxy config file.
#[derive(Clone)]
pub struct ProxyResolver {
    config_path: PathBuf,
    env: EnvLookup,
}

impl fmt::Debug for ProxyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyResolver")
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}

impl ProxyResolver {
    /// Resolver reading the process environment.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            env: Arc::new(|key| std::env::var(key).ok()),
        }
    }

    /// Replace the environment lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    pub fn resolve(&self) -> ProxySettings {
        self.resolve_with_env(|key| (self.env)(key))
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve_with_env<F>(&self, lookup: F) -> ProxySettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = PROXY_ENV_VARS
            .iter()
            .any(|key| lookup(key).is_some_and(|v| !v.trim().is_empty()));
        if from_env {
            tracing::debug!("Proxy variables set in environment, deferring to them");
            return ProxySettings::Environment;
        }

        match std::fs::read_to_string(&self.config_path) {
            Ok(content) => {
                let settings = parser::proxy_settings(&content);
                tracing::debug!(
                    path = %self.config_path.display(),
                    ?settings,
                    "Proxy settings from config file"
                );
                settings
            }
            Err(e) => {
                tracing::debug!(
                    path = %self.config_path.display(),
                    error = %e,
                    "No proxy config file, connecting directly"
                );
                ProxySettings::Disabled
            }
        }
    }
}

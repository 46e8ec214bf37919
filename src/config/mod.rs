//! Configuration module for instance-flavor-check
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`FLAVOR_CHECK_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use instance_flavor_check::config::FlavorCheckConfig;
//!
//! // Load defaults
//! let config = FlavorCheckConfig::default();
//! assert_eq!(config.query.max_attempts, 3);
//!
//! // Parse from TOML
//! let toml = r#"
//! [query]
//! timeout_ms = 500
//! "#;
//! let config: FlavorCheckConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.query.timeout_ms, 500);
//! ```

pub mod error;
pub mod logging;
pub mod paths;
pub mod registration;

pub use error::ConfigError;
pub use logging::{LogFormat, LogTarget, LoggingConfig};
pub use paths::PathsConfig;
pub use registration::RegistrationConfig;

// Component configs live next to the components that use them
pub use crate::query::QueryConfig;
pub use crate::reachability::ReachabilityConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/instance-flavor-check.toml";

/// Unified configuration for a flavor check run.
///
/// # Example
///
/// ```rust
/// use instance_flavor_check::config::FlavorCheckConfig;
///
/// let config = FlavorCheckConfig::default();
/// assert_eq!(config.registration.domain, "susecloud.net");
/// assert_eq!(config.query.path, "/api/instance/check");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlavorCheckConfig {
    /// Local files read and written during a run
    pub paths: PathsConfig,
    /// Update server request settings
    pub query: QueryConfig,
    /// Update server discovery
    pub registration: RegistrationConfig,
    /// Connectivity probing
    pub reachability: ReachabilityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl FlavorCheckConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.message().to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports FLAVOR_CHECK_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("FLAVOR_CHECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FLAVOR_CHECK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Some(cache) = lookup("FLAVOR_CHECK_CACHE_PATH") {
            if !cache.is_empty() {
                self.paths.cache = PathBuf::from(cache);
            }
        }
        if let Some(timeout) = lookup("FLAVOR_CHECK_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.query.timeout_ms = t;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.scheme != "https" && self.query.scheme != "http" {
            return Err(ConfigError::Validation {
                field: "query.scheme".to_string(),
                message: "scheme must be http or https".to_string(),
            });
        }
        if !self.query.path.starts_with('/') {
            return Err(ConfigError::Validation {
                field: "query.path".to_string(),
                message: "path must start with '/'".to_string(),
            });
        }
        if self.query.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "query.max_attempts".to_string(),
                message: "at least one attempt is required".to_string(),
            });
        }
        if self.query.timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "query.timeout_ms".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.registration.domain.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "registration.domain".to_string(),
                message: "domain cannot be empty".to_string(),
            });
        }

        for (field, target) in [
            ("reachability.ipv4_target", &self.reachability.ipv4_target),
            ("reachability.ipv6_target", &self.reachability.ipv6_target),
        ] {
            if target.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: format!("'{}' is not an ip:port socket address", target),
                });
            }
        }

        Ok(())
    }
}

//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration file could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("invalid TOML in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = ConfigError::NotFound(PathBuf::from("/etc/instance-flavor-check.toml"));
        assert_eq!(
            err.to_string(),
            "config file /etc/instance-flavor-check.toml does not exist"
        );

        let err = ConfigError::Read {
            path: PathBuf::from("/etc/instance-flavor-check.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err
            .to_string()
            .starts_with("cannot read config file /etc/instance-flavor-check.toml: "));
    }

    #[test]
    fn test_validation_message() {
        let err = ConfigError::Validation {
            field: "query.max_attempts".to_string(),
            message: "at least one attempt is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for 'query.max_attempts': at least one attempt is required"
        );
    }
}

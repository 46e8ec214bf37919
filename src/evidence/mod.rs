//! Local evidence gathering.
//!
//! Two facts are needed before an update server can be asked anything:
//! the instance metadata, produced by the provider command named in the
//! registration client config, and the OS identifier from the base product
//! definition. Failures are logged and reported as absent evidence.

mod error;
pub mod parser;

pub use error::EvidenceError;

use crate::command;
use crate::config::PathsConfig;
use std::path::PathBuf;

/// INI section holding the metadata provider command.
pub const INSTANCE_SECTION: &str = "instance";
/// INI key holding the metadata provider command.
pub const DATA_PROVIDER_KEY: &str = "dataProvider";

/// Metadata and identifier sent to the update server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub metadata: String,
    pub identifier: String,
}

/// Collects [`Evidence`] from the local system.
#[derive(Debug, Clone)]
pub struct EvidenceCollector {
    region_client_config: PathBuf,
    base_product: PathBuf,
}

impl EvidenceCollector {
    pub fn new(region_client_config: impl Into<PathBuf>, base_product: impl Into<PathBuf>) -> Self {
        Self {
            region_client_config: region_client_config.into(),
            base_product: base_product.into(),
        }
    }

    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(&paths.region_client_config, &paths.base_product)
    }

    /// Gather both pieces of evidence. Absent if either one is missing.
    pub async fn collect(&self) -> Option<Evidence> {
        let metadata = self.metadata().await;
        let identifier = self.identifier();

        match (metadata, identifier) {
            (Some(metadata), Some(identifier)) => Some(Evidence {
                metadata,
                identifier,
            }),
            _ => None,
        }
    }

    /// Instance metadata from the configured provider command.
    pub async fn metadata(&self) -> Option<String> {
        match self.try_metadata().await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::error!(error = %e, "Could not fetch the instance metadata");
                None
            }
        }
    }

    /// Lowercased product name from the base product definition.
    pub fn identifier(&self) -> Option<String> {
        match self.try_identifier() {
            Ok(identifier) => Some(identifier),
            Err(e) => {
                tracing::error!(error = %e, "Could not determine the product identifier");
                None
            }
        }
    }

    /// Provider command line from the registration client config.
    pub fn data_provider(&self) -> Result<String, EvidenceError> {
        let content = std::fs::read_to_string(&self.region_client_config).map_err(|source| {
            EvidenceError::ConfigRead {
                path: self.region_client_config.clone(),
                source,
            }
        })?;

        parser::ini_value(&content, INSTANCE_SECTION, DATA_PROVIDER_KEY)
            .filter(|cmd| !cmd.is_empty() && !cmd.eq_ignore_ascii_case("none"))
            .ok_or_else(|| EvidenceError::MissingDataProvider(self.region_client_config.clone()))
    }

    async fn try_metadata(&self) -> Result<String, EvidenceError> {
        let command_line = self.data_provider()?;
        let output = command::run(&command_line).await?;
        if output.trim().is_empty() {
            return Err(EvidenceError::EmptyOutput(command_line));
        }

        tracing::debug!(command = %command_line, bytes = output.len(), "Fetched instance metadata");
        Ok(output)
    }

    fn try_identifier(&self) -> Result<String, EvidenceError> {
        let content = std::fs::read_to_string(&self.base_product).map_err(|source| {
            EvidenceError::ProductRead {
                path: self.base_product.clone(),
                source,
            }
        })?;

        parser::product_name(&content)
            .ok_or_else(|| EvidenceError::ProductParse(self.base_product.clone()))
    }
}

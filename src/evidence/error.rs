//! Error types for evidence collection.

use crate::command::CommandError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a piece of evidence could not be obtained.
///
/// These never leave the collector; they are logged and turned into absent
/// evidence.
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("could not read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no data provider configured in section [instance] of {}", .0.display())]
    MissingDataProvider(PathBuf),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("'{0}' produced no output")]
    EmptyOutput(String),

    #[error("could not open {}: {source}", .path.display())]
    ProductRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no product name found in {}", .0.display())]
    ProductParse(PathBuf),
}

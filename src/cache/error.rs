//! Error types for the flavor cache.

use std::path::PathBuf;
use thiserror::Error;

/// Cache file could not be read or written.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cached flavor from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cached flavor to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

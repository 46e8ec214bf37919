//! Persisted last-known flavor.
//!
//! The cache is a single text file holding exactly `PAYG` or `BYOS`. It is
//! refreshed on every run and read back only when no update server answered.
//! Access is not locked; one checker runs per host at a time.

mod error;

pub use error::CacheError;

use crate::flavor::Flavor;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store of the last determined flavor.
#[derive(Debug, Clone)]
pub struct FlavorCache {
    path: PathBuf,
}

impl FlavorCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached flavor.
    ///
    /// A missing or unrecognised entry is initialised to BYOS.
    pub fn read(&self) -> Result<Flavor, CacheError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cached flavor, initialising to BYOS");
                self.write(Flavor::Byos)?;
                return Ok(Flavor::Byos);
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match content.trim().parse::<Flavor>() {
            Ok(flavor) => Ok(flavor),
            Err(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    content = %content.trim(),
                    "Unrecognised cached flavor, resetting to BYOS"
                );
                self.write(Flavor::Byos)?;
                Ok(Flavor::Byos)
            }
        }
    }

    /// Overwrite the cached flavor.
    pub fn write(&self, flavor: Flavor) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, flavor.as_str()).map_err(|source| CacheError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), %flavor, "Cached flavor");
        Ok(())
    }
}

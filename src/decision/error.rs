//! Error types for the decision pipeline.

use crate::cache::CacheError;
use thiserror::Error;

/// Failures that abort a flavor check.
///
/// Every other problem degrades to an undetermined or cached answer.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}

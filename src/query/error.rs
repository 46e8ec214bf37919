//! Error types for update server queries.

use thiserror::Error;

/// Why a single query attempt produced no flavor.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Address is not an IP literal; no request was made
    #[error("update server IP address {0} is not valid")]
    InvalidAddress(String),

    /// Request timeout
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP client could not be built (e.g. a malformed proxy URL)
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Non-200 response
    #[error("request to check if instance is PAYG/BYOS failed: {0}")]
    HttpStatus(String),

    /// Invalid response body
    #[error("invalid response: {0}")]
    ParseError(String),

    /// Response named a flavor this checker does not know
    #[error("unknown flavor in response: {0}")]
    UnknownFlavor(String),
}

impl QueryError {
    /// Only timeouts are worth another attempt against the same address.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}

//! Update server instance check.
//!
//! Asks one update server whether this instance is PAYG or BYOS. Each
//! address gets a bounded number of attempts; only timeouts are retried,
//! any other failure gives up on the address right away so the caller can
//! move on to the next candidate.

mod config;
mod error;
pub mod parser;

pub use config::QueryConfig;
pub use error::QueryError;

use crate::address::parser::url_host;
use crate::evidence::Evidence;
use crate::flavor::Flavor;
use crate::proxy::ProxySettings;

/// Issues instance check requests against update servers.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    config: QueryConfig,
}

impl QueryEngine {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Instance check URL for `address`, without query parameters.
    pub fn check_url(&self, address: &str) -> Result<String, QueryError> {
        let host = url_host(address).ok_or_else(|| QueryError::InvalidAddress(address.to_string()))?;
        let port = self
            .config
            .port
            .map(|p| format!(":{}", p))
            .unwrap_or_default();

        Ok(format!(
            "{}://{}{}{}",
            self.config.scheme, host, port, self.config.path
        ))
    }

    /// Build an HTTP client honouring `proxy`.
    pub fn build_client(&self, proxy: &ProxySettings) -> Result<reqwest::Client, QueryError> {
        let builder = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .danger_accept_invalid_certs(self.config.accept_invalid_certs);

        let builder = match proxy {
            // reqwest reads the proxy variables itself
            ProxySettings::Environment => builder,
            ProxySettings::Disabled => builder.no_proxy(),
            ProxySettings::Explicit(endpoints) => {
                let no_proxy = endpoints
                    .no_proxy
                    .as_deref()
                    .and_then(reqwest::NoProxy::from_string);
                let mut builder = builder.no_proxy();
                if let Some(http) = &endpoints.http {
                    let proxy = reqwest::Proxy::http(http)
                        .map_err(|e| QueryError::Client(e.to_string()))?
                        .no_proxy(no_proxy.clone());
                    builder = builder.proxy(proxy);
                }
                if let Some(https) = &endpoints.https {
                    let proxy = reqwest::Proxy::https(https)
                        .map_err(|e| QueryError::Client(e.to_string()))?
                        .no_proxy(no_proxy);
                    builder = builder.proxy(proxy);
                }
                builder
            }
        };

        builder.build().map_err(|e| QueryError::Client(e.to_string()))
    }

    /// Ask the update server at `address` for the instance flavor.
    ///
    /// Returns `None` when the address is invalid, the server cannot be
    /// reached, or it gives no usable answer.
    pub async fn query(
        &self,
        address: &str,
        evidence: &Evidence,
        proxy: &ProxySettings,
    ) -> Option<Flavor> {
        let url = match self.check_url(address) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(address, error = %e, "Skipping update server");
                return None;
            }
        };

        let client = match self.build_client(proxy) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(address, error = %e, "Could not prepare instance check request");
                return None;
            }
        };

        let max_attempts = self.config.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.attempt(&client, &url, evidence).await {
                Ok(flavor) => {
                    tracing::info!(address, attempt, %flavor, "Update server answered");
                    return Some(flavor);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        address,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Instance check timed out, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                Err(e) => {
                    tracing::error!(address, attempt, error = %e, "Instance check failed");
                    return None;
                }
            }
        }

        None
    }

    /// One instance check request.
    pub async fn attempt(
        &self,
        client: &reqwest::Client,
        url: &str,
        evidence: &Evidence,
    ) -> Result<Flavor, QueryError> {
        let response = client
            .get(url)
            .query(&[
                ("metadata", evidence.metadata.as_str()),
                ("identifier", evidence.identifier.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(QueryError::HttpStatus(status.to_string()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.classify_error(e)
            } else {
                QueryError::ParseError(e.to_string())
            }
        })?;

        parser::parse_check_response(&body)
    }

    /// Classify reqwest error into QueryError.
    fn classify_error(&self, e: reqwest::Error) -> QueryError {
        if e.is_timeout() {
            QueryError::Timeout(self.config.timeout_ms)
        } else {
            // All other errors treated as connection failures
            QueryError::ConnectionFailed(e.to_string())
        }
    }
}

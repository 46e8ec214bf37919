//! Flavor decision pipeline.
//!
//! Runs one check end to end: connectivity, local evidence, update server
//! discovery, then the update servers in order. Whatever the outcome, the
//! cache holds the flavor that was reported.

mod error;


pub use error::ResolveError;

use crate::address::AddressResolver;
use crate::cache::FlavorCache;
use crate::config::FlavorCheckConfig;
use crate::evidence::EvidenceCollector;
use crate::flavor::{Flavor, FlavorOutcome, UndeterminedReason};
use crate::proxy::ProxyResolver;
use crate::query::QueryEngine;
use crate::reachability::{Reachability, SocketProbe};
use std::sync::Arc;

/// Decides whether this instance is PAYG or BYOS.
pub struct FlavorResolver {
    reachability: Arc<dyn Reachability>,
    evidence: EvidenceCollector,
    addresses: AddressResolver,
    proxy: ProxyResolver,
    query: QueryEngine,
    cache: FlavorCache,
}

impl FlavorResolver {
    pub fn new(
        reachability: Arc<dyn Reachability>,
        evidence: EvidenceCollector,
        addresses: AddressResolver,
        proxy: ProxyResolver,
        query: QueryEngine,
        cache: FlavorCache,
    ) -> Self {
        Self {
            reachability,
            evidence,
            addresses,
            proxy,
            query,
            cache,
        }
    }

    /// Wire every component from configuration, probing real sockets.
    pub fn from_config(config: &FlavorCheckConfig) -> Self {
        Self::new(
            Arc::new(SocketProbe::new(&config.reachability)),
            EvidenceCollector::from_config(&config.paths),
            AddressResolver::from_config(config),
            ProxyResolver::new(&config.paths.proxy_config),
            QueryEngine::new(config.query.clone()),
            FlavorCache::new(&config.paths.cache),
        )
    }

    /// Replace the connectivity oracle.
    pub fn with_reachability(mut self, reachability: Arc<dyn Reachability>) -> Self {
        self.reachability = reachability;
        self
    }

    pub fn cache(&self) -> &FlavorCache {
        &self.cache
    }

    /// Run the check once.
    pub async fn resolve(&self) -> Result<FlavorOutcome, ResolveError> {
        let connectivity = self.reachability.connectivity().await;
        tracing::debug!(ipv4 = connectivity.ipv4, ipv6 = connectivity.ipv6, "Connectivity");
        if !connectivity.any() {
            tracing::warn!("No IPv4 or IPv6 connectivity, assuming BYOS");
            return self.undetermined(UndeterminedReason::NoNetwork);
        }

        let Some(evidence) = self.evidence.collect().await else {
            tracing::warn!("Instance metadata or product identifier unavailable, assuming BYOS");
            return self.undetermined(UndeterminedReason::MissingEvidence);
        };

        let addresses = self.addresses.resolve(connectivity).await;
        if addresses.is_empty() {
            tracing::warn!("No update server address found: instance can be either BYOS or PAYG and not registered");
            return self.undetermined(UndeterminedReason::NoAddresses);
        }
        tracing::debug!(?addresses, "Update server candidates");

        let proxy = self.proxy.resolve();
        for address in &addresses {
            if let Some(flavor) = self.query.query(address, &evidence, &proxy).await {
                self.cache.write(flavor)?;
                tracing::info!(%flavor, address = %address, "Instance flavor determined");
                return Ok(FlavorOutcome::from_server(flavor, address.as_str()));
            }
        }

        let flavor = self.cache.read()?;
        tracing::warn!(
            %flavor,
            attempted = addresses.len(),
            "No update server answered, using cached flavor"
        );
        tracing::info!(%flavor, "Instance flavor determined");
        Ok(FlavorOutcome::from_cache(flavor))
    }

    fn undetermined(&self, reason: UndeterminedReason) -> Result<FlavorOutcome, ResolveError> {
        self.cache.write(Flavor::Byos)?;
        let outcome = FlavorOutcome::undetermined(reason);
        tracing::info!(flavor = %outcome.flavor, ?reason, "Instance flavor undetermined");
        Ok(outcome)
    }
}

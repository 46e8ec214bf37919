//! Shared test utilities for instance-flavor-check integration tests.
//!
//! Builds a throwaway instance layout (registration client config, base
//! product, hosts file, cache) in a temporary directory.

#![allow(dead_code)]

use instance_flavor_check::address::AddressResolver;
use instance_flavor_check::cache::FlavorCache;
use instance_flavor_check::config::{FlavorCheckConfig, QueryConfig};
use instance_flavor_check::decision::FlavorResolver;
use instance_flavor_check::evidence::{Evidence, EvidenceCollector};
use instance_flavor_check::query::QueryEngine;
use instance_flavor_check::proxy::{ProxyResolver, PROXY_ENV_VARS};
use instance_flavor_check::reachability::{Connectivity, StaticReachability};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Well-Known Test Constants
// =============================================================================

pub const CHECK_PATH: &str = "/api/instance/check";

/// Region client config whose provider command prints `metadata-blob`.
pub const REGION_CONFIG: &str = "[server]\napi = regionInfo\n\n[instance]\ndataProvider = echo metadata-blob\n";

pub const BASE_PRODUCT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<product schemeversion="0">
  <vendor>SUSE</vendor>
  <name>SLES</name>
  <version>15.5</version>
</product>
"#;

pub fn evidence() -> Evidence {
    Evidence {
        metadata: "metadata-blob".to_string(),
        identifier: "sles".to_string(),
    }
}

// =============================================================================
// Mock update server
// =============================================================================

/// Update server answering every instance check with `flavor`.
pub async fn flavor_server(flavor: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "flavor": flavor })))
        .mount(&server)
        .await;
    server
}

/// Plain-HTTP query settings aimed at `server`, with short timings.
pub fn query_config(server: &MockServer) -> QueryConfig {
    QueryConfig {
        scheme: "http".to_string(),
        port: Some(server.address().port()),
        timeout_ms: 200,
        max_attempts: 3,
        retry_delay_ms: 10,
        ..Default::default()
    }
}

// =============================================================================
// Instance layout
// =============================================================================

pub struct InstanceFixture {
    pub dir: TempDir,
    pub config: FlavorCheckConfig,
}

impl InstanceFixture {
    /// Registered-looking instance with no update server entry yet.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = FlavorCheckConfig::default();
        config.paths.region_client_config = dir.path().join("regionserverclnt.cfg");
        config.paths.base_product = dir.path().join("baseproduct");
        config.paths.hosts = dir.path().join("hosts");
        config.paths.proxy_config = dir.path().join("proxy");
        config.paths.cache = dir.path().join("cache").join("flavor");
        // Closed local ports, so connectivity probes fail fast
        config.reachability.ipv4_target = "127.0.0.1:1".to_string();
        config.reachability.ipv6_target = "[::1]:1".to_string();
        config.reachability.timeout_ms = 200;

        let fixture = Self { dir, config };
        fixture.write_region_config(REGION_CONFIG);
        fixture.write_base_product(BASE_PRODUCT);
        fixture.write_hosts("127.0.0.1 localhost\n");
        fixture
    }

    pub fn write_region_config(&self, content: &str) {
        std::fs::write(&self.config.paths.region_client_config, content).unwrap();
    }

    pub fn write_base_product(&self, content: &str) {
        std::fs::write(&self.config.paths.base_product, content).unwrap();
    }

    pub fn write_hosts(&self, content: &str) {
        std::fs::write(&self.config.paths.hosts, content).unwrap();
    }

    /// Point the hosts file at `addresses`, one update server entry each.
    pub fn register(&self, addresses: &[&str]) {
        let mut hosts = String::from("127.0.0.1 localhost\n# 10.0.0.1 smt-old.susecloud.net\n");
        for (i, address) in addresses.iter().enumerate() {
            hosts.push_str(&format!("{} smt-{}.susecloud.net smt-{}\n", address, i, i));
        }
        self.write_hosts(&hosts);
    }

    pub fn seed_cache(&self, content: &str) {
        let cache = &self.config.paths.cache;
        if let Some(parent) = cache.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(cache, content).unwrap();
    }

    pub fn cached(&self) -> Option<String> {
        std::fs::read_to_string(&self.config.paths.cache).ok()
    }

    /// Serialize the configuration to a file the binary can load.
    pub fn write_config(&self) -> PathBuf {
        let path = self.dir.path().join("instance-flavor-check.toml");
        std::fs::write(&path, toml::to_string(&self.config).unwrap()).unwrap();
        path
    }

    /// Resolver with fixed connectivity and no ambient proxy variables.
    pub fn resolver(&self, connectivity: Connectivity) -> FlavorResolver {
        self.resolver_from(&self.config, connectivity)
    }

    pub fn resolver_from(
        &self,
        config: &FlavorCheckConfig,
        connectivity: Connectivity,
    ) -> FlavorResolver {
        FlavorResolver::new(
            Arc::new(StaticReachability(connectivity)),
            EvidenceCollector::from_config(&config.paths),
            AddressResolver::from_config(config),
            ProxyResolver::new(&config.paths.proxy_config).with_env(|_| None),
            QueryEngine::new(config.query.clone()),
            FlavorCache::new(&config.paths.cache),
        )
    }
}

pub fn ipv4_only() -> Connectivity {
    Connectivity {
        ipv4: true,
        ipv6: false,
    }
}

/// Proxy variables to strip from child process environments.
pub fn proxy_env_vars() -> &'static [&'static str] {
    &PROXY_ENV_VARS
}

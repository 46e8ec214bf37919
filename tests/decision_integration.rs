//! End-to-end decision pipeline tests on a temporary instance layout.

mod common;

use common::{flavor_server, ipv4_only, query_config, InstanceFixture, CHECK_PATH};
use instance_flavor_check::flavor::{Flavor, FlavorOutcome, OutcomeSource, UndeterminedReason};
use instance_flavor_check::reachability::Connectivity;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_registered_payg_instance() {
    let server = flavor_server("PAYG").await;
    let mut fixture = InstanceFixture::new();
    fixture.config.query = query_config(&server);
    fixture.register(&["127.0.0.1"]);

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(outcome, FlavorOutcome::from_server(Flavor::Payg, "127.0.0.1"));
    assert_eq!(outcome.exit_code(), 10);
    assert_eq!(fixture.cached().as_deref(), Some("PAYG"));
}

#[tokio::test]
async fn test_registered_byos_instance() {
    let server = flavor_server("BYOS").await;
    let mut fixture = InstanceFixture::new();
    fixture.config.query = query_config(&server);
    fixture.register(&["127.0.0.1"]);
    fixture.seed_cache("PAYG");

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(outcome.exit_code(), 11);
    assert_eq!(fixture.cached().as_deref(), Some("BYOS"));
}

#[tokio::test]
async fn test_no_network_overwrites_cache() {
    let fixture = InstanceFixture::new();
    fixture.register(&["127.0.0.1"]);
    fixture.seed_cache("PAYG");

    let outcome = fixture
        .resolver(Connectivity::default())
        .resolve()
        .await
        .unwrap();

    assert_eq!(outcome, FlavorOutcome::undetermined(UndeterminedReason::NoNetwork));
    assert_eq!(outcome.exit_code(), 12);
    assert_eq!(fixture.cached().as_deref(), Some("BYOS"));
}

#[tokio::test]
async fn test_missing_base_product_is_undetermined() {
    let fixture = InstanceFixture::new();
    fixture.register(&["127.0.0.1"]);
    std::fs::remove_file(&fixture.config.paths.base_product).unwrap();

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(
        outcome.source,
        OutcomeSource::Undetermined {
            reason: UndeterminedReason::MissingEvidence
        }
    );
    assert_eq!(fixture.cached().as_deref(), Some("BYOS"));
}

#[tokio::test]
async fn test_unregistered_instance_is_undetermined() {
    let fixture = InstanceFixture::new();

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(outcome, FlavorOutcome::undetermined(UndeterminedReason::NoAddresses));
    assert_eq!(fixture.cached().as_deref(), Some("BYOS"));
}

#[tokio::test]
async fn test_fallback_command_supplies_address() {
    let server = flavor_server("PAYG").await;
    let mut fixture = InstanceFixture::new();
    fixture.config.query = query_config(&server);
    fixture.config.registration.fallback_command = Some("echo smt 127.0.0.1 2001:db8::1".to_string());

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    // IPv6 candidate dropped without IPv6 connectivity
    assert_eq!(outcome, FlavorOutcome::from_server(Flavor::Payg, "127.0.0.1"));
}

#[tokio::test]
async fn test_every_server_failing_uses_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mut fixture = InstanceFixture::new();
    fixture.config.query = query_config(&server);
    // Nothing listens on 127.0.0.2, the mock server answers 503
    fixture.register(&["127.0.0.2", "127.0.0.1"]);
    fixture.seed_cache("PAYG");

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(outcome, FlavorOutcome::from_cache(Flavor::Payg));
    assert_eq!(outcome.exit_code(), 10);
}

#[tokio::test]
async fn test_garbled_cache_reads_as_byos() {
    let fixture = InstanceFixture::new();
    // Nothing listens on 127.0.0.2:1
    fixture.register(&["127.0.0.2"]);
    fixture.seed_cache("amazing flavor");

    let mut config = fixture.config.clone();
    config.query.scheme = "http".to_string();
    config.query.port = Some(1);
    let outcome = fixture
        .resolver_from(&config, ipv4_only())
        .resolve()
        .await
        .unwrap();

    assert_eq!(outcome, FlavorOutcome::from_cache(Flavor::Byos));
    assert_eq!(fixture.cached().as_deref(), Some("BYOS"));
}

#[tokio::test]
async fn test_proxy_config_file_routes_queries() {
    let proxy = flavor_server("BYOS").await;
    let mut fixture = InstanceFixture::new();
    fixture.config.query.scheme = "http".to_string();
    fixture.config.query.max_attempts = 1;
    fixture.register(&["203.0.113.1"]);
    std::fs::write(
        &fixture.config.paths.proxy_config,
        format!(
            "PROXY_ENABLED=\"yes\"\nHTTP_PROXY=\"{}\"\nNO_PROXY=\"localhost\"\n",
            proxy.uri()
        ),
    )
    .unwrap();

    let outcome = fixture.resolver(ipv4_only()).resolve().await.unwrap();

    assert_eq!(outcome, FlavorOutcome::from_server(Flavor::Byos, "203.0.113.1"));
    assert_eq!(proxy.received_requests().await.unwrap().len(), 1);
}

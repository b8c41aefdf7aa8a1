use axum::body::{to_bytes, Body};
use axum::http::Request;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tower::ServiceExt;
use zkns_backend::config::Config;
use zkns_backend::http::{router, AppState};
use zkns_backend::registry::{Endpoint, FakeRegistryClient, Instance};
use zkns_backend::soa::SoaConfig;

fn test_config() -> Config {
    Config {
        domain: "basedomain.example.com".to_string(),
        ttl: 60,
        soa: SoaConfig {
            ttl: 300,
            ns1: "ns1.example.com".to_string(),
            email: "root.basedomain.example.com".to_string(),
            refresh: 1200,
            retry: 180,
            expire: 86400,
            nxdomain_ttl: 60,
        },
        zk_connect_string: "localhost:2181/".to_string(),
        listen: "0.0.0.0".parse::<IpAddr>().unwrap(),
        port: 8080,
        drain_deadline_secs: 30,
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn a_record_sharded_end_to_end() {
    let registry = Arc::new(FakeRegistryClient::new());
    registry.set(
        "buz/bas/bar/foo/job",
        vec![
            Instance {
                service_endpoint: Endpoint { host: "10.0.0.1".to_string(), port: 0 },
                additional_endpoints: HashMap::new(),
                shard: Some(0),
            },
            Instance {
                service_endpoint: Endpoint { host: "10.0.0.2".to_string(), port: 0 },
                additional_endpoints: HashMap::new(),
                shard: Some(1),
            },
        ],
    );

    let state = AppState { config: Arc::new(test_config()), registry };
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dnsapi/lookup/0.job.foo.bar.bas.buz.basedomain.example.com./A")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({"result": [{
            "qtype": "A",
            "qname": "0.job.foo.bar.bas.buz.basedomain.example.com.",
            "ttl": 60,
            "content": "10.0.0.1",
        }]})
    );
}

#[tokio::test]
async fn unknown_qtype_returns_false() {
    let registry = Arc::new(FakeRegistryClient::new());
    let state = AppState { config: Arc::new(test_config()), registry };
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dnsapi/lookup/basedomain.example.com./TXT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"result": false}));
}

#[tokio::test]
async fn soa_edit_metadata_is_advertised() {
    let registry = Arc::new(FakeRegistryClient::new());
    let state = AppState { config: Arc::new(test_config()), registry };
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dnsapi/getDomainMetadata/basedomain.example.com./SOA-EDIT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"result": ["EPOCH"]}));
}

#[tokio::test]
async fn other_metadata_kind_returns_false() {
    let registry = Arc::new(FakeRegistryClient::new());
    let state = AppState { config: Arc::new(test_config()), registry };
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dnsapi/getDomainMetadata/basedomain.example.com./ALLOW-AXFR-FROM")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"result": false}));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let registry = Arc::new(FakeRegistryClient::new());
    let state = AppState { config: Arc::new(test_config()), registry };
    let app = router(state);

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

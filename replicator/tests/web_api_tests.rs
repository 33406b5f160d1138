mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::fixtures::*;
use replicator::web::{create_router, AppState};
use replicator::{
    Config, PeerConfig, PeerLink, ReplicationClient, StaticPeerLink, SyncService,
    TransferTracker,
};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    store: TestDatastore,
    router: Router,
}

async fn test_app(peer_addr: SocketAddr) -> TestApp {
    let store = TestDatastore::new().await.unwrap();

    let mut configured = HashMap::new();
    configured.insert(
        peers::TABLET_B.to_string(),
        PeerConfig {
            host: peer_addr.ip().to_string(),
            port: peer_addr.port(),
            enabled: true,
            description: None,
        },
    );
    let config = Arc::new(Config {
        device_name: peers::TABLET_A.to_string(),
        listen_host: "127.0.0.1".to_string(),
        replication_port: 5555,
        control_host: "127.0.0.1".to_string(),
        control_port: 8096,
        database_path: "unused".to_string(),
        peers: configured.clone(),
    });

    let tracker = Arc::new(TransferTracker::new());
    let link: Arc<dyn PeerLink> = Arc::new(StaticPeerLink::new(configured));
    let client = Arc::new(ReplicationClient::new(Arc::new(store.exporter())));
    let sync_service = Arc::new(SyncService::new(link, client, tracker.clone()));

    let state = AppState::new(config, store.database.clone(), sync_service, tracker);
    TestApp {
        router: create_router(state),
        store,
    }
}

async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Json) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_device() {
    let app = test_app("127.0.0.1:5555".parse().unwrap()).await;

    let (status, body) = call(&app.router, "GET", "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["device_name"], peers::TABLET_A);
    assert_eq!(body["data"]["known_peers"], 1);
}

#[tokio::test]
async fn test_peer_listing() {
    let app = test_app("127.0.0.1:5555".parse().unwrap()).await;

    let (status, body) = call(&app.router, "GET", "/api/peers").await;

    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], peers::TABLET_B);
}

#[tokio::test]
async fn test_send_to_unknown_peer_is_not_found() {
    let app = test_app("127.0.0.1:5555".parse().unwrap()).await;

    let (status, body) = call(&app.router, "POST", "/api/peers/nobody/send").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_send_through_api_reaches_peer() {
    let receiver = TestListener::start().await.unwrap();
    let app = test_app(receiver.addr).await;
    app.store
        .seed(tables::AME, vec![ame_row(1, "Asha")])
        .await
        .unwrap();

    let uri = format!("/api/peers/{}/send", peers::TABLET_B);
    let (status, body) = call(&app.router, "POST", &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rows"], 1);

    receiver.wait_for_inbound(1).await;
    assert_eq!(receiver.store.rows(tables::AME).await.len(), 1);

    let (_, transfers) = call(&app.router, "GET", "/api/transfers").await;
    assert_eq!(transfers["data"]["total_active"], 0);
    assert_eq!(transfers["data"]["recent"][0]["direction"], "outbound");
    assert_eq!(transfers["data"]["recent"][0]["status"], "written");

    receiver.stop().await;
}

#[tokio::test]
async fn test_send_to_unreachable_peer_is_bad_gateway() {
    let unused = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = unused.local_addr().unwrap();
    drop(unused);
    let app = test_app(addr).await;

    let uri = format!("/api/peers/{}/send", peers::TABLET_B);
    let (status, body) = call(&app.router, "POST", &uri).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("127.0.0.1"));
}

#[tokio::test]
async fn test_table_counts() {
    let app = test_app("127.0.0.1:5555".parse().unwrap()).await;
    app.store
        .seed(
            tables::PRESCRIPTIONS,
            vec![
                prescription_row(1, "Amoxicillin", 7),
                prescription_row(2, "Ibuprofen", 3),
            ],
        )
        .await
        .unwrap();

    let (status, body) = call(&app.router, "GET", "/api/datastore/tables").await;

    assert_eq!(status, StatusCode::OK);
    let counts = body["data"].as_array().unwrap();
    assert_eq!(counts.len(), 3);
    let prescriptions = counts
        .iter()
        .find(|c| c["table"] == tables::PRESCRIPTIONS)
        .unwrap();
    assert_eq!(prescriptions["rows"], 2);
}

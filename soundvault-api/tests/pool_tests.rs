//! Connection pool release tests
//!
//! Failed transactional writes must hand their connection back to the pool:
//! with N connections, N failing requests followed by one more request may
//! not hang.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use soundvault_api::{build_router, AppState};
use soundvault_common::db::{init_database, PoolSettings};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const POOL_SIZE: u32 = 2;

async fn setup_small_pool_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let settings = PoolSettings {
        max_connections: POOL_SIZE,
        acquire_timeout: Duration::from_secs(2),
    };
    let pool = init_database(&temp_dir.path().join("pool.db"), settings)
        .await
        .expect("Should initialize database");
    (build_router(AppState::new(pool, false)), temp_dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_failed_creates_release_connections() {
    let (app, _dir) = setup_small_pool_app().await;

    // Dangling foreign key: the insert fails inside the transaction
    for _ in 0..POOL_SIZE {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/recordings",
                json!({"title": "Orphan", "artist_id": "missing-artist"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let follow_up = app.clone().oneshot(
        Request::builder()
            .uri("/api/recordings")
            .body(Body::empty())
            .unwrap(),
    );
    let response = tokio::time::timeout(Duration::from_secs(5), follow_up)
        .await
        .expect("Request after failed writes should not hang")
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_failed_updates_release_connections() {
    let (app, _dir) = setup_small_pool_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/releases", json!({"title": "Dawn", "type": "single"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    for _ in 0..POOL_SIZE {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/releases/{}", id),
                json!({"title": "Dawn", "type": "single", "label_id": "missing-label"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let follow_up = app.clone().oneshot(json_request(
        "PUT",
        &format!("/api/releases/{}", id),
        json!({"title": "Dawn (Remastered)", "type": "single"}),
    ));
    let response = tokio::time::timeout(Duration::from_secs(5), follow_up)
        .await
        .expect("Request after failed writes should not hang")
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, router_with_movie_repo};
use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::types::{CatalogId, StorageId};
use marquee_db::{MovieRepository, StoreError};
use tower::ServiceExt;

/// A movie store that is down.
struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Inconsistent("store offline".into())
}

#[async_trait]
impl MovieRepository for OfflineStore {
    async fn find_by_catalog_id(&self, _: CatalogId) -> Result<Option<StoredMovie>, StoreError> {
        Err(offline())
    }

    async fn find_many(&self, _: &[CatalogId]) -> Result<Vec<StoredMovie>, StoreError> {
        Err(offline())
    }

    async fn insert(&self, _: &MovieRecord) -> Result<StorageId, StoreError> {
        Err(offline())
    }

    async fn merge(&self, _: CatalogId, _: &MovieRecord) -> Result<bool, StoreError> {
        Err(offline())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(offline())
    }
}

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app();
    let response = get(app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_backend"], "memory");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn health_check_is_503_when_store_is_down() {
    let router = router_with_movie_repo(Arc::new(OfflineStore));
    let response = get(router, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app();
    let response = get(app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /this-route-does-not-exist");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app();
    let response = get(app.router, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/movies/popular")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "authorization")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}

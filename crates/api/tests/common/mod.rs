#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use marquee_api::auth::jwt::{generate_access_token, JwtConfig};
use marquee_api::config::{LogFormat, ServerConfig, StoreConfig};
use marquee_api::movies::MovieService;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_db::memory::{MemoryAnnotationRepo, MemoryMovieRepo};
use marquee_db::{MovieRepository, UserAnnotationStore};
use marquee_tmdb::{CatalogClient, CatalogError, CatalogRequest};

// ---------------------------------------------------------------------------
// Scripted catalog
// ---------------------------------------------------------------------------

/// What the fake catalog answers for a path.
#[derive(Clone)]
pub enum Scripted {
    Body(Value),
    NotFound,
    Status(u16),
}

/// In-process [`CatalogClient`] answering from a path-keyed script.
/// Unscripted paths answer 503.
#[derive(Default)]
pub struct FakeCatalog {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<CatalogRequest>>,
}

impl FakeCatalog {
    pub fn respond(&self, path: &str, answer: Scripted) {
        self.script
            .lock()
            .unwrap()
            .insert(path.to_string(), answer);
    }

    pub fn calls(&self) -> Vec<CatalogRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<Value, CatalogError> {
        self.calls.lock().unwrap().push(request.clone());
        let path = request.endpoint.path();
        let answer = self.script.lock().unwrap().get(&path).cloned();
        match answer {
            Some(Scripted::Body(body)) => Ok(body),
            Some(Scripted::NotFound) => Err(CatalogError::NotFound { path }),
            Some(Scripted::Status(status)) => Err(CatalogError::Api {
                status,
                body: "scripted failure".into(),
            }),
            None => Err(CatalogError::Api {
                status: 503,
                body: "unscripted".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw catalog payloads
// ---------------------------------------------------------------------------

pub fn raw_movie(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("Overview of {title}"),
        "poster_path": format!("/poster-{id}.jpg"),
        "backdrop_path": null,
        "release_date": "1999-03-31",
        "vote_average": 8.2,
        "vote_count": 25000,
        "popularity": 80.5,
        "original_language": "en",
        "genre_ids": [28, 878]
    })
}

pub fn raw_details(id: i64, title: &str) -> Value {
    let mut raw = raw_movie(id, title);
    let extra = json!({
        "runtime": 136,
        "budget": 63000000,
        "tagline": "Welcome to the Real World.",
        "imdb_id": "tt0133093",
        "genres": [{"id": 28, "name": "Action"}],
        "credits": {
            "cast": [{"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/keanu.jpg", "order": 0}],
            "crew": [
                {"id": 9339, "name": "Lilly Wachowski", "job": "Director", "department": "Directing", "profile_path": null},
                {"id": 1, "name": "Someone", "job": "Gaffer", "department": "Lighting", "profile_path": null}
            ]
        },
        "videos": {"results": [
            {"id": "v1", "key": "abc", "name": "Trailer", "site": "YouTube", "type": "Trailer", "official": true}
        ]},
        "recommendations": {"results": [
            {"id": 604, "title": "The Matrix Reloaded", "poster_path": "/reloaded.jpg", "vote_average": 7.0}
        ]}
    });
    if let (Some(base), Value::Object(extra)) = (raw.as_object_mut(), extra) {
        base.extend(extra);
    }
    raw
}

pub fn raw_page(results: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "total_pages": 3,
        "total_results": 60,
        "results": results
    })
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        store: StoreConfig::memory(),
        log_format: LogFormat::Text,
    }
}

/// The router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<FakeCatalog>,
    pub movies: Arc<MemoryMovieRepo>,
}

/// Build the full application router with the same middleware stack as
/// production, backed by in-memory repositories and a scripted catalog.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let catalog = Arc::new(FakeCatalog::default());
    let movies = Arc::new(MemoryMovieRepo::new());
    let annotations = UserAnnotationStore::new(Arc::new(MemoryAnnotationRepo::new()));

    let service = MovieService::new(catalog.clone(), movies.clone(), annotations);
    let state = AppState::new(config.clone(), service);

    TestApp {
        router: build_app_router(state, &config),
        catalog,
        movies,
    }
}

/// Router over a caller-supplied movie repository and an unscripted catalog.
pub fn router_with_movie_repo(movies: Arc<dyn MovieRepository>) -> Router {
    let config = test_config();
    let annotations = UserAnnotationStore::new(Arc::new(MemoryAnnotationRepo::new()));
    let service = MovieService::new(Arc::new(FakeCatalog::default()), movies, annotations);
    build_app_router(AppState::new(config.clone(), service), &config)
}

/// Bearer token for `user_id` signed with the test secret.
pub fn token(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

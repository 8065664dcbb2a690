//! Handlers for the caller's own annotations.
//!
//! Rows are created lazily by the first toggle or rating, so there is no
//! create endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use marquee_core::annotation::UserAnnotation;
use marquee_core::error::CoreError;
use marquee_core::types::CatalogId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::RateRequest;
use crate::response::DataResponse;
use crate::state::AppState;

type AnnotationResponse = AppResult<Json<DataResponse<UserAnnotation>>>;

/// GET /api/v1/movies/annotations
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserAnnotation>>>> {
    let annotations = state.annotations().all(user.user_id).await?;
    Ok(Json(DataResponse { data: annotations }))
}

/// GET /api/v1/movies/annotations/{catalog_id}
///
/// `data` is `null` when the caller never annotated the movie.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
) -> AppResult<Json<DataResponse<Option<UserAnnotation>>>> {
    let annotation = state.annotations().get(user.user_id, catalog_id).await?;
    Ok(Json(DataResponse { data: annotation }))
}

/// POST /api/v1/movies/favorite/{catalog_id}
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
) -> AnnotationResponse {
    let annotation = state
        .annotations()
        .toggle_favorite(user.user_id, catalog_id)
        .await?;
    Ok(Json(DataResponse { data: annotation }))
}

/// POST /api/v1/movies/watchlist/{catalog_id}
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
) -> AnnotationResponse {
    let annotation = state
        .annotations()
        .toggle_watchlist(user.user_id, catalog_id)
        .await?;
    Ok(Json(DataResponse { data: annotation }))
}

/// POST /api/v1/movies/watched/{catalog_id}
pub async fn toggle_watched(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
) -> AnnotationResponse {
    let annotation = state
        .annotations()
        .toggle_watched(user.user_id, catalog_id)
        .await?;
    Ok(Json(DataResponse { data: annotation }))
}

/// POST /api/v1/movies/rate/{catalog_id}
///
/// Body: `{"rating": 7.5}`; a numeric string is accepted too. An unreadable
/// body is a validation error like any other bad rating.
pub async fn rate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> AnnotationResponse {
    let Json(input) = payload.map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
    let rating = input
        .rating
        .ok_or_else(|| AppError::BadRequest("rating is required".into()))?
        .to_f64()?;
    let annotation = state
        .annotations()
        .rate(user.user_id, catalog_id, rating)
        .await?;
    Ok(Json(DataResponse { data: annotation }))
}

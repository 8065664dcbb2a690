//! Handlers for catalog-backed movie reads under `/movies`.
//!
//! Every response is a cached [`MovieView`] with the caller's `user_data`
//! attached when an annotation exists.

use axum::extract::{Path, Query, State};
use axum::Json;
use marquee_core::annotation::{AnnotationFilter, AnnotationFlag};
use marquee_core::listing::{ListingKind, Page};
use marquee_core::merge::MovieView;
use marquee_core::types::CatalogId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

type PageResponse = AppResult<Json<DataResponse<Page<MovieView>>>>;
type ListResponse = AppResult<Json<DataResponse<Vec<MovieView>>>>;

async fn listing(
    state: AppState,
    user: AuthUser,
    kind: ListingKind,
    params: PageParams,
) -> PageResponse {
    let page = state.movies.listing(user.user_id, kind, params.page).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/movies/popular
pub async fn popular(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> PageResponse {
    listing(state, user, ListingKind::Popular, params).await
}

/// GET /api/v1/movies/top_rated
pub async fn top_rated(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> PageResponse {
    listing(state, user, ListingKind::TopRated, params).await
}

/// GET /api/v1/movies/now_playing
pub async fn now_playing(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> PageResponse {
    listing(state, user, ListingKind::NowPlaying, params).await
}

/// GET /api/v1/movies/upcoming
pub async fn upcoming(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> PageResponse {
    listing(state, user, ListingKind::Upcoming, params).await
}

/// GET /api/v1/movies/search?query=&page=
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> PageResponse {
    let page = state
        .movies
        .search(user.user_id, params.query.as_deref(), params.page)
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/movies/details/{catalog_id}
pub async fn details(
    State(state): State<AppState>,
    user: AuthUser,
    Path(catalog_id): Path<CatalogId>,
) -> AppResult<Json<DataResponse<MovieView>>> {
    let movie = state.movies.details(user.user_id, catalog_id).await?;
    Ok(Json(DataResponse { data: movie }))
}

async fn annotated(state: AppState, user: AuthUser, filter: AnnotationFilter) -> ListResponse {
    let movies = state.movies.annotated(user.user_id, filter).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/favorites
pub async fn favorites(State(state): State<AppState>, user: AuthUser) -> ListResponse {
    annotated(state, user, AnnotationFilter::Flag(AnnotationFlag::Favorite)).await
}

/// GET /api/v1/movies/watchlist
pub async fn watchlist(State(state): State<AppState>, user: AuthUser) -> ListResponse {
    annotated(state, user, AnnotationFilter::Flag(AnnotationFlag::Watchlist)).await
}

/// GET /api/v1/movies/watched
pub async fn watched(State(state): State<AppState>, user: AuthUser) -> ListResponse {
    annotated(state, user, AnnotationFilter::Flag(AnnotationFlag::Watched)).await
}

/// GET /api/v1/movies/rated
pub async fn rated(State(state): State<AppState>, user: AuthUser) -> ListResponse {
    annotated(state, user, AnnotationFilter::Rated).await
}

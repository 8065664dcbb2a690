use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{annotations, movies};
use crate::state::AppState;

/// Routes mounted at `/movies`.
pub fn router() -> Router<AppState> {
    Router::new()
        // Catalog-backed reads.
        .route("/popular", get(movies::popular))
        .route("/top_rated", get(movies::top_rated))
        .route("/now_playing", get(movies::now_playing))
        .route("/upcoming", get(movies::upcoming))
        .route("/search", get(movies::search))
        .route("/details/{catalog_id}", get(movies::details))
        // Annotation-driven lists.
        .route("/favorites", get(movies::favorites))
        .route("/watchlist", get(movies::watchlist))
        .route("/watched", get(movies::watched))
        .route("/rated", get(movies::rated))
        // Annotation writes.
        .route("/favorite/{catalog_id}", post(annotations::toggle_favorite))
        .route("/watchlist/{catalog_id}", post(annotations::toggle_watchlist))
        .route("/watched/{catalog_id}", post(annotations::toggle_watched))
        .route("/rate/{catalog_id}", post(annotations::rate))
        // Raw annotations.
        .route("/annotations", get(annotations::list))
        .route("/annotations/{catalog_id}", get(annotations::get))
}

pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies/popular                        listing (GET, ?page=)
/// /movies/top_rated                      listing (GET, ?page=)
/// /movies/now_playing                    listing (GET, ?page=)
/// /movies/upcoming                       listing (GET, ?page=)
/// /movies/search                         search (GET, ?query=&page=)
/// /movies/details/{catalog_id}           details (GET)
///
/// /movies/favorites                      annotated movies (GET)
/// /movies/watchlist                      annotated movies (GET)
/// /movies/watched                        annotated movies (GET)
/// /movies/rated                          annotated movies (GET)
///
/// /movies/favorite/{catalog_id}          toggle (POST)
/// /movies/watchlist/{catalog_id}         toggle (POST)
/// /movies/watched/{catalog_id}           toggle (POST)
/// /movies/rate/{catalog_id}              rate (POST, {"rating": f64})
///
/// /movies/annotations                    caller's annotations (GET)
/// /movies/annotations/{catalog_id}       one annotation or null (GET)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movies", movies::router())
}

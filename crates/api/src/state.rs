use std::sync::Arc;

use marquee_db::UserAnnotationStore;

use crate::config::ServerConfig;
use crate::movies::MovieService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub movies: Arc<MovieService>,
}

impl AppState {
    pub fn new(config: ServerConfig, movies: MovieService) -> Self {
        Self {
            config: Arc::new(config),
            movies: Arc::new(movies),
        }
    }

    pub fn annotations(&self) -> &UserAnnotationStore {
        self.movies.annotations()
    }
}

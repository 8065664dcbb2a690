//! Storage for the movie cache and per-user annotations.
//!
//! Two backends implement the [`repository`] traits: PostgreSQL (JSONB
//! documents, see [`repositories`]) and an in-process map (see [`memory`]).
//! [`cache::CatalogCache`] and [`annotations::UserAnnotationStore`] sit on
//! top and are what the API layer talks to.

use sqlx::postgres::PgPoolOptions;

pub mod annotations;
pub mod cache;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod repository;

pub use annotations::UserAnnotationStore;
pub use cache::{CatalogCache, PageUpsert};
pub use error::StoreError;
pub use repository::{AnnotationRepository, MovieRepository};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

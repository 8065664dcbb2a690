//! Catalog collaborator: the TMDB HTTP client and the trait the cache
//! layer consumes it through.

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;

pub use api::{TmdbApi, TmdbConfig};
pub use client::CatalogClient;
pub use endpoint::{CatalogEndpoint, CatalogRequest};
pub use error::CatalogError;

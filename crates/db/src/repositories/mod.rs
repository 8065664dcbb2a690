//! PostgreSQL repositories.
//!
//! Each repository owns a clone of the pool and implements one of the
//! [`crate::repository`] traits.

pub mod annotation_repo;
pub mod movie_repo;

pub use annotation_repo::PgAnnotationRepo;
pub use movie_repo::PgMovieRepo;

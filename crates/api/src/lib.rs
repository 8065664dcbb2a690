//! Marquee API server library.
//!
//! Exposes the building blocks (config, state, error handling, the movie
//! service, routes) so integration tests and the binary entrypoint share
//! them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

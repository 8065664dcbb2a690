//! Identity primitives.
//!
//! - [`jwt`] -- access-token validation (and generation for tests and tooling).

pub mod jwt;

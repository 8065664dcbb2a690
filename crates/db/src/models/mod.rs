//! Row structs for the PostgreSQL backend.
//!
//! Each submodule holds a `FromRow` struct matching the table and its
//! conversion into the domain type from `marquee-core`.

pub mod annotation;
pub mod movie;

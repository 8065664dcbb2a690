//! Domain types and pure logic for the movie catalog cache.
//!
//! Nothing in this crate performs I/O: shaping raw catalog records,
//! validating caller input, and overlaying annotations onto movies are all
//! plain functions over owned data.

pub mod annotation;
pub mod error;
pub mod listing;
pub mod merge;
pub mod movie;
pub mod raw;
pub mod shaper;
pub mod types;

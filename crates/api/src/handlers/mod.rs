pub mod annotations;
pub mod movies;

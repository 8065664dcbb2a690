//! Overlay of a caller's annotations onto cached movies.

use std::collections::HashMap;

use serde::Serialize;

use crate::annotation::{UserAnnotation, UserData};
use crate::movie::StoredMovie;
use crate::types::CatalogId;

/// A stored movie plus the caller's `user_data`, if any.
///
/// `user_data` is omitted entirely when no annotation exists, which callers
/// must read differently from an annotation with every flag cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    #[serde(flatten)]
    pub movie: StoredMovie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserData>,
}

/// Attach one annotation (or none) to one movie.
pub fn merge(movie: StoredMovie, annotation: Option<&UserAnnotation>) -> MovieView {
    MovieView {
        movie,
        user_data: annotation.map(UserAnnotation::user_data),
    }
}

/// Overlay annotations onto a page of movies, keeping the movies' order.
pub fn overlay(movies: Vec<StoredMovie>, annotations: &[UserAnnotation]) -> Vec<MovieView> {
    let by_catalog: HashMap<CatalogId, &UserAnnotation> =
        annotations.iter().map(|a| (a.catalog_id, a)).collect();
    movies
        .into_iter()
        .map(|movie| {
            let annotation = by_catalog.get(&movie.catalog_id()).copied();
            merge(movie, annotation)
        })
        .collect()
}

/// Join in the inverse direction: one view per annotation, in annotation
/// order. Annotations whose movie was never cached are skipped.
pub fn join_annotated(annotations: &[UserAnnotation], movies: Vec<StoredMovie>) -> Vec<MovieView> {
    let mut by_catalog: HashMap<CatalogId, StoredMovie> =
        movies.into_iter().map(|m| (m.catalog_id(), m)).collect();
    annotations
        .iter()
        .filter_map(|annotation| {
            let movie = by_catalog.remove(&annotation.catalog_id)?;
            Some(merge(movie, Some(annotation)))
        })
        .collect()
}

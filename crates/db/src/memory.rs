//! In-process backend for local runs and tests.
//!
//! Movies are kept as raw JSON objects so that merges behave exactly like
//! the JSONB `||` in [`crate::repositories::PgMovieRepo`]: top-level keys of
//! the incoming record replace stored ones and everything else is kept.

use std::collections::HashMap;

use async_trait::async_trait;
use marquee_core::annotation::{AnnotationFilter, AnnotationFlag, NewAnnotation, UserAnnotation};
use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::types::{CatalogId, StorageId, UserId};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::{AnnotationRepository, MovieRepository};

type Document = Map<String, Value>;

fn to_document(record: &MovieRecord) -> Result<Document, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Inconsistent(format!(
            "movie {} serialized to a non-object: {other}",
            record.catalog_id
        ))),
    }
}

fn to_stored(storage_id: StorageId, document: &Document) -> Result<StoredMovie, StoreError> {
    let record: MovieRecord = serde_json::from_value(Value::Object(document.clone()))?;
    Ok(StoredMovie { storage_id, record })
}

/// Movie documents keyed by catalog id.
#[derive(Default)]
pub struct MemoryMovieRepo {
    documents: RwLock<HashMap<CatalogId, (StorageId, Document)>>,
}

impl MemoryMovieRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl MovieRepository for MemoryMovieRepo {
    async fn find_by_catalog_id(
        &self,
        catalog_id: CatalogId,
    ) -> Result<Option<StoredMovie>, StoreError> {
        let documents = self.documents.read().await;
        documents
            .get(&catalog_id)
            .map(|(storage_id, document)| to_stored(*storage_id, document))
            .transpose()
    }

    async fn find_many(&self, catalog_ids: &[CatalogId]) -> Result<Vec<StoredMovie>, StoreError> {
        let documents = self.documents.read().await;
        catalog_ids
            .iter()
            .filter_map(|id| documents.get(id))
            .map(|(storage_id, document)| to_stored(*storage_id, document))
            .collect()
    }

    async fn insert(&self, record: &MovieRecord) -> Result<StorageId, StoreError> {
        let incoming = to_document(record)?;
        let mut documents = self.documents.write().await;
        match documents.get_mut(&record.catalog_id) {
            Some((storage_id, document)) => {
                document.extend(incoming);
                Ok(*storage_id)
            }
            None => {
                let storage_id = StorageId::generate();
                documents.insert(record.catalog_id, (storage_id, incoming));
                Ok(storage_id)
            }
        }
    }

    async fn merge(&self, catalog_id: CatalogId, record: &MovieRecord) -> Result<bool, StoreError> {
        let incoming = to_document(record)?;
        let mut documents = self.documents.write().await;
        match documents.get_mut(&catalog_id) {
            Some((_, document)) => {
                document.extend(incoming);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Annotation rows in insertion (creation) order.
#[derive(Default)]
pub struct MemoryAnnotationRepo {
    rows: RwLock<Vec<UserAnnotation>>,
}

impl MemoryAnnotationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: StorageId, apply: F) -> Option<UserAnnotation>
    where
        F: FnOnce(&mut UserAnnotation) + Send,
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|row| row.id == id)?;
        apply(row);
        row.updated_at = chrono::Utc::now();
        Some(row.clone())
    }
}

#[async_trait]
impl AnnotationRepository for MemoryAnnotationRepo {
    async fn find(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.user_id == user_id && row.catalog_id == catalog_id)
            .cloned())
    }

    async fn find_many(
        &self,
        user_id: UserId,
        catalog_ids: &[CatalogId],
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id && catalog_ids.contains(&row.catalog_id))
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserAnnotation>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_matching(
        &self,
        user_id: UserId,
        filter: AnnotationFilter,
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id && filter.matches(row))
            .cloned()
            .collect())
    }

    async fn insert(&self, input: &NewAnnotation) -> Result<UserAnnotation, StoreError> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|row| row.user_id == input.user_id && row.catalog_id == input.catalog_id)
        {
            return Err(StoreError::Conflict(format!(
                "annotation for user {} and movie {} already exists",
                input.user_id, input.catalog_id
            )));
        }
        let row = input
            .clone()
            .into_annotation(StorageId::generate(), chrono::Utc::now());
        rows.push(row.clone());
        Ok(row)
    }

    async fn set_flag(
        &self,
        id: StorageId,
        flag: AnnotationFlag,
        value: bool,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        Ok(self.update(id, |row| row.set_flag(flag, value)).await)
    }

    async fn set_rating(
        &self,
        id: StorageId,
        rating: f64,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        Ok(self.update(id, |row| row.rating = Some(rating)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::movie::MovieDetails;

    fn record(catalog_id: CatalogId, runtime: Option<i64>) -> MovieRecord {
        MovieRecord {
            catalog_id,
            title: "Heat".into(),
            overview: String::new(),
            poster_url: Some("https://image.tmdb.org/t/p/w500/heat.jpg".into()),
            backdrop_url: None,
            release_date: "1995-12-15".into(),
            vote_average: 7.9,
            vote_count: 7000,
            popularity: 40.0,
            original_language: "en".into(),
            genre_ids: vec![80, 18],
            details: MovieDetails {
                runtime: runtime.map(Some),
                ..MovieDetails::default()
            },
        }
    }

    #[tokio::test]
    async fn merge_keeps_keys_the_record_omits() {
        let repo = MemoryMovieRepo::new();
        repo.insert(&record(949, Some(170))).await.unwrap();

        let mut listing = record(949, None);
        listing.poster_url = None;
        assert!(repo.merge(949, &listing).await.unwrap());

        let stored = repo.find_by_catalog_id(949).await.unwrap().unwrap();
        assert_eq!(stored.record.details.runtime, Some(Some(170)));
        assert_eq!(stored.record.poster_url, None);
    }

    #[tokio::test]
    async fn merge_writes_explicit_null_over_stored_value() {
        let repo = MemoryMovieRepo::new();
        repo.insert(&record(949, Some(170))).await.unwrap();

        let mut cleared = record(949, None);
        cleared.details.runtime = Some(None);
        assert!(repo.merge(949, &cleared).await.unwrap());

        let stored = repo.find_by_catalog_id(949).await.unwrap().unwrap();
        assert_eq!(stored.record.details.runtime, Some(None));
    }

    #[tokio::test]
    async fn merge_of_unknown_movie_reports_false() {
        let repo = MemoryMovieRepo::new();
        assert!(!repo.merge(1, &record(1, None)).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn second_insert_keeps_first_storage_id() {
        let repo = MemoryMovieRepo::new();
        let first = repo.insert(&record(949, None)).await.unwrap();
        let second = repo.insert(&record(949, Some(170))).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_annotation_is_a_conflict() {
        let repo = MemoryAnnotationRepo::new();
        let input = NewAnnotation::toggled(1, 949, AnnotationFlag::Favorite);
        repo.insert(&input).await.unwrap();
        let err = repo.insert(&input).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn set_flag_on_missing_row_is_none() {
        let repo = MemoryAnnotationRepo::new();
        let updated = repo
            .set_flag(StorageId::generate(), AnnotationFlag::Watched, true)
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}

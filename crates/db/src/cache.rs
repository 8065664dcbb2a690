//! The upsert-and-merge cache over [`MovieRepository`].

use std::sync::Arc;

use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::shaper;
use serde_json::Value;

use crate::error::StoreError;
use crate::repository::MovieRepository;

/// Outcome of upserting one page of raw catalog records.
#[derive(Debug, Default)]
pub struct PageUpsert {
    /// Stored forms of every record that made it, in input order.
    pub movies: Vec<StoredMovie>,
    /// Records that failed to shape or store and were left out.
    pub skipped: usize,
}

/// Reconciles shaped catalog records with the movie store.
///
/// Upserts are not atomic across lookup, merge, and re-read. Concurrent
/// upserts for one catalog id resolve last-write-wins per field.
#[derive(Clone)]
pub struct CatalogCache {
    movies: Arc<dyn MovieRepository>,
}

impl CatalogCache {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    pub fn repository(&self) -> &Arc<dyn MovieRepository> {
        &self.movies
    }

    /// Insert or merge `record` and return the canonical stored form.
    ///
    /// An existing document keeps its storage id; fields the record omits
    /// stay as they were.
    pub async fn upsert(&self, record: &MovieRecord) -> Result<StoredMovie, StoreError> {
        let catalog_id = record.catalog_id;

        let merged = match self.movies.find_by_catalog_id(catalog_id).await? {
            Some(_) => self.movies.merge(catalog_id, record).await?,
            None => false,
        };
        if !merged {
            let storage_id = self.movies.insert(record).await?;
            tracing::debug!(catalog_id, storage_id = %storage_id, "Cached new movie");
        }

        self.movies
            .find_by_catalog_id(catalog_id)
            .await?
            .ok_or_else(|| {
                StoreError::Inconsistent(format!("movie {catalog_id} vanished after upsert"))
            })
    }

    /// Shape one raw record and upsert it. Shaping failures are returned
    /// before anything touches the store.
    pub async fn shape_and_upsert(
        &self,
        raw: &Value,
        include_details: bool,
    ) -> Result<StoredMovie, StoreError> {
        let record = shaper::shape(raw, include_details)?;
        self.upsert(&record).await
    }

    /// Shape and upsert every record of a listing or search page.
    ///
    /// Each record is handled independently: a failure is logged and counted
    /// and the rest of the page is still processed.
    pub async fn upsert_page(&self, raw_results: &[Value]) -> PageUpsert {
        let mut outcome = PageUpsert {
            movies: Vec::with_capacity(raw_results.len()),
            skipped: 0,
        };

        for raw in raw_results {
            match self.shape_and_upsert(raw, false).await {
                Ok(movie) => outcome.movies.push(movie),
                Err(e) => {
                    outcome.skipped += 1;
                    let catalog_id = raw.get("id").and_then(Value::as_i64);
                    tracing::warn!(?catalog_id, error = %e, "Skipping catalog record");
                }
            }
        }

        if outcome.skipped > 0 {
            tracing::warn!(
                stored = outcome.movies.len(),
                skipped = outcome.skipped,
                "Catalog page partially cached"
            );
        }
        outcome
    }
}

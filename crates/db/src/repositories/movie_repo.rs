//! Repository for the `movies` table.

use async_trait::async_trait;
use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::types::{CatalogId, StorageId};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::movie::MovieRow;
use crate::repository::MovieRepository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "storage_id, document";

/// Movie documents stored as JSONB, merged with the `||` operator.
#[derive(Clone)]
pub struct PgMovieRepo {
    pool: PgPool,
}

impl PgMovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepo {
    async fn find_by_catalog_id(
        &self,
        catalog_id: CatalogId,
    ) -> Result<Option<StoredMovie>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE catalog_id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(catalog_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StoredMovie::from))
    }

    async fn find_many(&self, catalog_ids: &[CatalogId]) -> Result<Vec<StoredMovie>, StoreError> {
        if catalog_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM movies WHERE catalog_id = ANY($1)");
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(catalog_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StoredMovie::from).collect())
    }

    /// A concurrent insert for the same catalog id lands in the
    /// `ON CONFLICT` branch, which merges and keeps the first storage id.
    async fn insert(&self, record: &MovieRecord) -> Result<StorageId, StoreError> {
        let storage_id: Uuid = sqlx::query_scalar(
            "INSERT INTO movies (storage_id, catalog_id, document)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_movies_catalog_id DO UPDATE SET
                document = movies.document || EXCLUDED.document,
                updated_at = NOW()
             RETURNING storage_id",
        )
        .bind(StorageId::generate().as_uuid())
        .bind(record.catalog_id)
        .bind(Json(record))
        .fetch_one(&self.pool)
        .await?;
        Ok(StorageId::from_uuid(storage_id))
    }

    async fn merge(&self, catalog_id: CatalogId, record: &MovieRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE movies SET document = document || $2, updated_at = NOW()
             WHERE catalog_id = $1",
        )
        .bind(catalog_id)
        .bind(Json(record))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

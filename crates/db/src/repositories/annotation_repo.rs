//! Repository for the `user_movie_annotations` table.

use async_trait::async_trait;
use marquee_core::annotation::{AnnotationFilter, AnnotationFlag, NewAnnotation, UserAnnotation};
use marquee_core::types::{CatalogId, StorageId, UserId};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::annotation::AnnotationRow;
use crate::repository::AnnotationRepository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, catalog_id, favorite, watchlist, watched, rating, created_at, updated_at";

#[derive(Clone)]
pub struct PgAnnotationRepo {
    pool: PgPool,
}

impl PgAnnotationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQL predicate selecting the rows a filter matches.
fn filter_predicate(filter: AnnotationFilter) -> &'static str {
    match filter {
        AnnotationFilter::Flag(AnnotationFlag::Favorite) => "favorite",
        AnnotationFilter::Flag(AnnotationFlag::Watchlist) => "watchlist",
        AnnotationFilter::Flag(AnnotationFlag::Watched) => "watched",
        AnnotationFilter::Rated => "rating IS NOT NULL",
    }
}

#[async_trait]
impl AnnotationRepository for PgAnnotationRepo {
    async fn find(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_movie_annotations
             WHERE user_id = $1 AND catalog_id = $2"
        );
        let row = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(user_id)
            .bind(catalog_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserAnnotation::from))
    }

    async fn find_many(
        &self,
        user_id: UserId,
        catalog_ids: &[CatalogId],
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        if catalog_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM user_movie_annotations
             WHERE user_id = $1 AND catalog_id = ANY($2)"
        );
        let rows = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(user_id)
            .bind(catalog_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserAnnotation::from).collect())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserAnnotation>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_movie_annotations
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserAnnotation::from).collect())
    }

    async fn list_matching(
        &self,
        user_id: UserId,
        filter: AnnotationFilter,
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        let predicate = filter_predicate(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM user_movie_annotations
             WHERE user_id = $1 AND {predicate}
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserAnnotation::from).collect())
    }

    async fn insert(&self, input: &NewAnnotation) -> Result<UserAnnotation, StoreError> {
        let query = format!(
            "INSERT INTO user_movie_annotations
                (id, user_id, catalog_id, favorite, watchlist, watched, rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(StorageId::generate().as_uuid())
            .bind(input.user_id)
            .bind(input.catalog_id)
            .bind(input.favorite)
            .bind(input.watchlist)
            .bind(input.watched)
            .bind(input.rating)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    StoreError::Conflict(format!(
                        "annotation for user {} and movie {} already exists",
                        input.user_id, input.catalog_id
                    ))
                }
                other => StoreError::Database(other),
            })?;
        Ok(row.into())
    }

    async fn set_flag(
        &self,
        id: StorageId,
        flag: AnnotationFlag,
        value: bool,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        let column = flag.as_str();
        let query = format!(
            "UPDATE user_movie_annotations SET {column} = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(id.as_uuid())
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserAnnotation::from))
    }

    async fn set_rating(
        &self,
        id: StorageId,
        rating: f64,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        let query = format!(
            "UPDATE user_movie_annotations SET rating = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(id.as_uuid())
            .bind(rating)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserAnnotation::from))
    }
}

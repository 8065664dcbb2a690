use marquee_core::annotation::UserAnnotation;
use marquee_core::types::{CatalogId, StorageId, Timestamp, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `user_movie_annotations` table.
#[derive(Debug, Clone, FromRow)]
pub struct AnnotationRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub catalog_id: CatalogId,
    pub favorite: bool,
    pub watchlist: bool,
    pub watched: bool,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AnnotationRow> for UserAnnotation {
    fn from(row: AnnotationRow) -> Self {
        UserAnnotation {
            id: StorageId::from_uuid(row.id),
            user_id: row.user_id,
            catalog_id: row.catalog_id,
            favorite: row.favorite,
            watchlist: row.watchlist,
            watched: row.watched,
            rating: row.rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

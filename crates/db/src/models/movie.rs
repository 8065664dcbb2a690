use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::types::StorageId;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `movies` table. The document column holds the merged
/// [`MovieRecord`].
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub storage_id: Uuid,
    pub document: Json<MovieRecord>,
}

impl From<MovieRow> for StoredMovie {
    fn from(row: MovieRow) -> Self {
        StoredMovie {
            storage_id: StorageId::from_uuid(row.storage_id),
            record: row.document.0,
        }
    }
}

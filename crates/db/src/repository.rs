//! Storage seams for cached movies and user annotations.
//!
//! The PostgreSQL implementations live in [`crate::repositories`]; the
//! in-memory ones in [`crate::memory`]. Both are handed to the stores as
//! `Arc<dyn ...>` at construction time.

use async_trait::async_trait;
use marquee_core::annotation::{AnnotationFilter, AnnotationFlag, NewAnnotation, UserAnnotation};
use marquee_core::movie::{MovieRecord, StoredMovie};
use marquee_core::types::{CatalogId, StorageId, UserId};

use crate::error::StoreError;

/// Document collection of cached movies keyed by catalog id.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_catalog_id(
        &self,
        catalog_id: CatalogId,
    ) -> Result<Option<StoredMovie>, StoreError>;

    /// Fetch every cached movie among `catalog_ids`, in no particular order.
    async fn find_many(&self, catalog_ids: &[CatalogId]) -> Result<Vec<StoredMovie>, StoreError>;

    /// Insert a new document and return its storage id.
    ///
    /// If a document for the same catalog id appeared concurrently, the
    /// record is merged into it instead and the existing id is returned.
    async fn insert(&self, record: &MovieRecord) -> Result<StorageId, StoreError>;

    /// Field-level merge of `record` into the stored document.
    ///
    /// Keys present in the serialized record overwrite stored ones; stored
    /// keys the record omits are left untouched. Returns `false` when no
    /// document exists for the catalog id.
    async fn merge(&self, catalog_id: CatalogId, record: &MovieRecord) -> Result<bool, StoreError>;

    /// Cheap liveness check for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Per-(user, movie) annotation rows.
#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    async fn find(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<Option<UserAnnotation>, StoreError>;

    /// The user's annotations for any of `catalog_ids`.
    async fn find_many(
        &self,
        user_id: UserId,
        catalog_ids: &[CatalogId],
    ) -> Result<Vec<UserAnnotation>, StoreError>;

    /// All of a user's annotations, oldest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserAnnotation>, StoreError>;

    /// A user's annotations matching `filter`, oldest first.
    async fn list_matching(
        &self,
        user_id: UserId,
        filter: AnnotationFilter,
    ) -> Result<Vec<UserAnnotation>, StoreError>;

    async fn insert(&self, input: &NewAnnotation) -> Result<UserAnnotation, StoreError>;

    /// Set one flag on an existing row. `None` if the row does not exist.
    async fn set_flag(
        &self,
        id: StorageId,
        flag: AnnotationFlag,
        value: bool,
    ) -> Result<Option<UserAnnotation>, StoreError>;

    /// Set the rating on an existing row. `None` if the row does not exist.
    async fn set_rating(
        &self,
        id: StorageId,
        rating: f64,
    ) -> Result<Option<UserAnnotation>, StoreError>;
}

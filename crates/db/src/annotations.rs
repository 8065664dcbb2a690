//! Per-user annotation operations over [`AnnotationRepository`].

use std::sync::Arc;

use marquee_core::annotation::{
    validate_rating, AnnotationFilter, AnnotationFlag, NewAnnotation, UserAnnotation,
};
use marquee_core::types::{CatalogId, UserId};

use crate::error::StoreError;
use crate::repository::AnnotationRepository;

/// Lazily-created favorite/watchlist/watched/rating state per
/// `(user, movie)` pair.
#[derive(Clone)]
pub struct UserAnnotationStore {
    repo: Arc<dyn AnnotationRepository>,
}

impl UserAnnotationStore {
    pub fn new(repo: Arc<dyn AnnotationRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<Option<UserAnnotation>, StoreError> {
        self.repo.find(user_id, catalog_id).await
    }

    /// Every annotation the user has, in creation order.
    pub async fn all(&self, user_id: UserId) -> Result<Vec<UserAnnotation>, StoreError> {
        self.repo.list_for_user(user_id).await
    }

    /// Flip `flag`, creating the row with only that flag set if it is new.
    pub async fn toggle(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
        flag: AnnotationFlag,
    ) -> Result<UserAnnotation, StoreError> {
        match self.repo.find(user_id, catalog_id).await? {
            Some(existing) => {
                let value = !existing.flag(flag);
                let updated = self
                    .repo
                    .set_flag(existing.id, flag, value)
                    .await?
                    .ok_or_else(|| vanished(user_id, catalog_id))?;
                tracing::debug!(
                    user_id,
                    catalog_id,
                    flag = flag.as_str(),
                    value,
                    "Toggled annotation"
                );
                Ok(updated)
            }
            None => {
                let created = self
                    .repo
                    .insert(&NewAnnotation::toggled(user_id, catalog_id, flag))
                    .await?;
                tracing::debug!(
                    user_id,
                    catalog_id,
                    flag = flag.as_str(),
                    "Created annotation"
                );
                Ok(created)
            }
        }
    }

    pub async fn toggle_favorite(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<UserAnnotation, StoreError> {
        self.toggle(user_id, catalog_id, AnnotationFlag::Favorite).await
    }

    pub async fn toggle_watchlist(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<UserAnnotation, StoreError> {
        self.toggle(user_id, catalog_id, AnnotationFlag::Watchlist).await
    }

    pub async fn toggle_watched(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
    ) -> Result<UserAnnotation, StoreError> {
        self.toggle(user_id, catalog_id, AnnotationFlag::Watched).await
    }

    /// Set the rating. The value is checked before the store is touched;
    /// a row created here is marked watched.
    pub async fn rate(
        &self,
        user_id: UserId,
        catalog_id: CatalogId,
        rating: f64,
    ) -> Result<UserAnnotation, StoreError> {
        validate_rating(rating)?;

        match self.repo.find(user_id, catalog_id).await? {
            Some(existing) => self
                .repo
                .set_rating(existing.id, rating)
                .await?
                .ok_or_else(|| vanished(user_id, catalog_id)),
            None => {
                self.repo
                    .insert(&NewAnnotation::rated(user_id, catalog_id, rating))
                    .await
            }
        }
    }

    pub async fn list_by_flag(
        &self,
        user_id: UserId,
        flag: AnnotationFlag,
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        self.repo
            .list_matching(user_id, AnnotationFilter::Flag(flag))
            .await
    }

    pub async fn list_rated(&self, user_id: UserId) -> Result<Vec<UserAnnotation>, StoreError> {
        self.repo
            .list_matching(user_id, AnnotationFilter::Rated)
            .await
    }

    pub async fn list_matching(
        &self,
        user_id: UserId,
        filter: AnnotationFilter,
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        self.repo.list_matching(user_id, filter).await
    }

    /// Bulk lookup used to overlay a page of movies.
    pub async fn find_for_movies(
        &self,
        user_id: UserId,
        catalog_ids: &[CatalogId],
    ) -> Result<Vec<UserAnnotation>, StoreError> {
        self.repo.find_many(user_id, catalog_ids).await
    }
}

fn vanished(user_id: UserId, catalog_id: CatalogId) -> StoreError {
    StoreError::Inconsistent(format!(
        "annotation for user {user_id} and movie {catalog_id} vanished during update"
    ))
}

//! Per-user movie annotations (favorite / watchlist / watched / rating).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{CatalogId, StorageId, Timestamp, UserId};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Validate that a rating lies within [`MIN_RATING`]..=[`MAX_RATING`].
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::InvalidRating(rating));
    }
    Ok(())
}

/// The three boolean annotation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationFlag {
    Favorite,
    Watchlist,
    Watched,
}

impl AnnotationFlag {
    pub const ALL: [AnnotationFlag; 3] = [Self::Favorite, Self::Watchlist, Self::Watched];

    /// Field (and column) name of the flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Watchlist => "watchlist",
            Self::Watched => "watched",
        }
    }
}

/// Filter for the annotation-driven movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFilter {
    Flag(AnnotationFlag),
    Rated,
}

impl AnnotationFilter {
    pub fn matches(&self, annotation: &UserAnnotation) -> bool {
        match self {
            Self::Flag(flag) => annotation.flag(*flag),
            Self::Rated => annotation.rating.is_some(),
        }
    }
}

/// A stored annotation row, unique per `(user_id, catalog_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnnotation {
    pub id: StorageId,
    pub user_id: UserId,
    pub catalog_id: CatalogId,
    pub favorite: bool,
    pub watchlist: bool,
    pub watched: bool,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserAnnotation {
    pub fn flag(&self, flag: AnnotationFlag) -> bool {
        match flag {
            AnnotationFlag::Favorite => self.favorite,
            AnnotationFlag::Watchlist => self.watchlist,
            AnnotationFlag::Watched => self.watched,
        }
    }

    pub fn set_flag(&mut self, flag: AnnotationFlag, value: bool) {
        match flag {
            AnnotationFlag::Favorite => self.favorite = value,
            AnnotationFlag::Watchlist => self.watchlist = value,
            AnnotationFlag::Watched => self.watched = value,
        }
    }

    /// The client-facing projection attached to movie responses.
    pub fn user_data(&self) -> UserData {
        UserData {
            favorite: self.favorite,
            watchlist: self.watchlist,
            watched: self.watched,
            rating: self.rating,
        }
    }
}

/// Values for a row created lazily by the first toggle or rate call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnotation {
    pub user_id: UserId,
    pub catalog_id: CatalogId,
    pub favorite: bool,
    pub watchlist: bool,
    pub watched: bool,
    pub rating: Option<f64>,
}

impl NewAnnotation {
    /// Row created by a first toggle: only the toggled flag is set.
    pub fn toggled(user_id: UserId, catalog_id: CatalogId, flag: AnnotationFlag) -> Self {
        Self {
            user_id,
            catalog_id,
            favorite: flag == AnnotationFlag::Favorite,
            watchlist: flag == AnnotationFlag::Watchlist,
            watched: flag == AnnotationFlag::Watched,
            rating: None,
        }
    }

    /// Row created by a first rating. Rating a movie marks it watched.
    pub fn rated(user_id: UserId, catalog_id: CatalogId, rating: f64) -> Self {
        Self {
            user_id,
            catalog_id,
            favorite: false,
            watchlist: false,
            watched: true,
            rating: Some(rating),
        }
    }

    /// Materialize the row with store-assigned id and timestamps.
    pub fn into_annotation(self, id: StorageId, now: Timestamp) -> UserAnnotation {
        UserAnnotation {
            id,
            user_id: self.user_id,
            catalog_id: self.catalog_id,
            favorite: self.favorite,
            watchlist: self.watchlist,
            watched: self.watched,
            rating: self.rating,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `user_data` block attached to a movie when the caller has an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub favorite: bool,
    pub watchlist: bool,
    pub watched: bool,
    pub rating: Option<f64>,
}

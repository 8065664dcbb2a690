//! Normalized movie documents as stored in the cache.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::rust::double_option;

use crate::types::{CatalogId, StorageId};

/// Shaped catalog entry, ready to be merged into the store.
///
/// Base fields always serialize (absent image URLs as `null`) so that a
/// merge overwrites them. The [`MovieDetails`] block is sparse: unset fields
/// are omitted from the document and therefore never clear stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub catalog_id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(flatten)]
    pub details: MovieDetails,
}

/// Fields only the details endpoint provides.
///
/// Scalar fields are doubly optional: the outer `None` means "not fetched"
/// and is omitted, `Some(None)` is an upstream `null` that clears the
/// stored value on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub runtime: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub budget: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub revenue: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub tagline: Option<Option<String>>,
    /// IMDb identifier of the title.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub external_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub homepage: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_companies: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_countries: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoken_languages: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<Vec<CrewMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl MovieDetails {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Billed cast entry; `order` is the upstream billing position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub person_id: i64,
    pub name: String,
    pub character: String,
    pub profile_url: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub person_id: i64,
    pub name: String,
    pub job: String,
    pub department: String,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub official: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub catalog_id: CatalogId,
    pub title: String,
    pub poster_url: Option<String>,
    pub vote_average: f64,
}

/// A [`MovieRecord`] as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMovie {
    pub storage_id: StorageId,
    #[serde(flatten)]
    pub record: MovieRecord,
}

impl StoredMovie {
    pub fn catalog_id(&self) -> CatalogId {
        self.record.catalog_id
    }
}

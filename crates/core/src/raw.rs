//! Raw catalog payloads as they arrive from the upstream API.
//!
//! Every field the shaper may read is optional at this level; the shaper
//! decides which absences are fatal. Nested credit/video/recommendation
//! entries keep the upstream field names.

use serde::Deserialize;
use serde_json::Value;
use serde_with::rust::double_option;

use crate::error::CoreError;
use crate::movie::Genre;
use crate::types::CatalogId;

/// One movie record from a listing, search, or details response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: Option<CatalogId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub popularity: Option<f64>,
    pub original_language: Option<String>,
    pub genre_ids: Option<Vec<i64>>,

    // Detail-endpoint fields. Scalars keep an explicit `null` apart from a
    // missing key.
    pub genres: Option<Vec<Genre>>,
    #[serde(default, with = "double_option")]
    pub runtime: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub budget: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub revenue: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub tagline: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub imdb_id: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub homepage: Option<Option<String>>,
    pub production_companies: Option<Vec<Value>>,
    pub production_countries: Option<Vec<Value>>,
    pub spoken_languages: Option<Vec<Value>>,

    // Sub-resources appended to the details call.
    pub credits: Option<RawCredits>,
    pub videos: Option<RawResults<RawVideo>>,
    pub recommendations: Option<RawResults<RawRecommendation>>,
}

impl RawMovie {
    /// Decode a raw JSON record, reporting type mismatches as malformed.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        Self::deserialize(value).map_err(|e| CoreError::MalformedRecord(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredits {
    pub cast: Option<Vec<RawCastMember>>,
    pub crew: Option<Vec<RawCrewMember>>,
}

/// Cast entry. Only `id` is required; null strings decode as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCastMember {
    pub id: i64,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCrewMember {
    pub id: i64,
    pub name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVideo {
    pub id: String,
    pub key: String,
    pub name: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub official: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRecommendation {
    pub id: CatalogId,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
}

/// `{ "results": [...] }` wrapper used by appended sub-resources.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResults<T> {
    pub results: Option<Vec<T>>,
}

/// A paged listing or search response.
///
/// Results stay as untyped JSON so each record can be shaped, and fail,
/// on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl RawPage {
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        serde_json::from_value(value)
            .map_err(|e| CoreError::UpstreamUnavailable(format!("unreadable listing page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_decode_as_none() {
        let raw = RawMovie::from_value(&json!({ "id": 5 })).unwrap();
        assert_eq!(raw.id, Some(5));
        assert!(raw.title.is_none());
        assert!(raw.credits.is_none());
    }

    #[test]
    fn wrong_type_is_malformed() {
        let err = RawMovie::from_value(&json!({ "id": "five", "title": "x" })).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord(_)));
    }

    #[test]
    fn explicit_null_scalar_differs_from_missing() {
        let raw = RawMovie::from_value(&json!({ "id": 5, "tagline": null })).unwrap();
        assert_eq!(raw.tagline, Some(None));
        assert_eq!(raw.homepage, None);
    }

    #[test]
    fn null_strings_in_nested_entries_decode() {
        let raw = RawMovie::from_value(&json!({
            "id": 5,
            "credits": { "cast": [{ "id": 1, "name": "A", "character": null }] },
            "videos": { "results": [{ "id": "v", "key": "k", "site": null, "type": null }] }
        }))
        .unwrap();
        assert_eq!(raw.credits.unwrap().cast.unwrap()[0].character, None);
        assert_eq!(raw.videos.unwrap().results.unwrap()[0].site, None);
    }

    #[test]
    fn page_without_results_is_empty() {
        let page = RawPage::from_value(json!({ "page": 2 })).unwrap();
        assert_eq!(page.page, Some(2));
        assert!(page.results.is_empty());
    }
}

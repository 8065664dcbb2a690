//! Query and body types shared by the movie handlers.

use marquee_core::error::CoreError;
use serde::Deserialize;

/// `?page=` for listing endpoints. Range-checked by the movie service.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

/// `?query=&page=` for search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}

/// Body of `POST /movies/rate/{catalog_id}`.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: Option<RatingValue>,
}

/// A rating sent either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingValue {
    Number(f64),
    Text(String),
}

impl RatingValue {
    /// The numeric rating. Range checks happen in the annotation store.
    pub fn to_f64(&self) -> Result<f64, CoreError> {
        match self {
            RatingValue::Number(n) => Ok(*n),
            RatingValue::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| CoreError::Validation(format!("rating must be a number, got {text:?}"))),
        }
    }
}

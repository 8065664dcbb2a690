//! Catalog listing kinds, paging, and search input validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::raw::RawPage;

/// Paged catalog listings served through the same fetch-and-cache routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl ListingKind {
    pub const ALL: [ListingKind; 4] = [
        Self::Popular,
        Self::TopRated,
        Self::NowPlaying,
        Self::Upcoming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::NowPlaying => "now_playing",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Lowest page the catalog accepts.
pub const MIN_PAGE: u32 = 1;

/// Highest page the catalog accepts.
pub const MAX_PAGE: u32 = 500;

/// Resolve an optional `page` parameter, defaulting to the first page.
pub fn validate_page(page: Option<u32>) -> Result<u32, CoreError> {
    let page = page.unwrap_or(MIN_PAGE);
    if !(MIN_PAGE..=MAX_PAGE).contains(&page) {
        return Err(CoreError::Validation(format!(
            "page must be between {MIN_PAGE} and {MAX_PAGE}, got {page}"
        )));
    }
    Ok(page)
}

/// Trim a search query and reject it when nothing is left.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, CoreError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(CoreError::Validation("Search query is required".to_string())),
    }
}

/// Paged response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Wrap shaped results with the upstream paging fields, defaulting
    /// missing ones to a single empty page.
    pub fn from_upstream(raw: &RawPage, results: Vec<T>) -> Self {
        Self {
            results,
            page: raw.page.unwrap_or(1),
            total_pages: raw.total_pages.unwrap_or(1),
            total_results: raw.total_results.unwrap_or(0),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Page<U> {
        Page {
            results: f(self.results),
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

//! Catalog endpoints and the parameters sent with them.

use marquee_core::listing::ListingKind;
use marquee_core::types::CatalogId;

/// Sub-resources folded into a single details call.
pub const DETAIL_APPENDS: &str = "credits,videos,recommendations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEndpoint {
    Listing(ListingKind),
    Search,
    Details(CatalogId),
}

impl CatalogEndpoint {
    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Listing(kind) => format!("movie/{}", kind.as_str()),
            Self::Search => "search/movie".to_string(),
            Self::Details(id) => format!("movie/{id}"),
        }
    }
}

/// One catalog call: an endpoint plus its query parameters.
///
/// Credentials and the response language are added by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub endpoint: CatalogEndpoint,
    pub params: Vec<(&'static str, String)>,
}

impl CatalogRequest {
    pub fn listing(kind: ListingKind, page: u32) -> Self {
        Self {
            endpoint: CatalogEndpoint::Listing(kind),
            params: vec![("page", page.to_string())],
        }
    }

    pub fn search(query: &str, page: u32) -> Self {
        Self {
            endpoint: CatalogEndpoint::Search,
            params: vec![("query", query.to_string()), ("page", page.to_string())],
        }
    }

    pub fn details(id: CatalogId) -> Self {
        Self {
            endpoint: CatalogEndpoint::Details(id),
            params: vec![("append_to_response", DETAIL_APPENDS.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_paths() {
        assert_eq!(
            CatalogEndpoint::Listing(ListingKind::Popular).path(),
            "movie/popular"
        );
        assert_eq!(
            CatalogEndpoint::Listing(ListingKind::NowPlaying).path(),
            "movie/now_playing"
        );
    }

    #[test]
    fn details_request_appends_sub_resources() {
        let request = CatalogRequest::details(603);
        assert_eq!(request.endpoint.path(), "movie/603");
        assert_eq!(
            request.params,
            vec![("append_to_response", "credits,videos,recommendations".to_string())]
        );
    }

    #[test]
    fn search_request_carries_query_and_page() {
        let request = CatalogRequest::search("heat", 2);
        assert_eq!(request.endpoint, CatalogEndpoint::Search);
        assert_eq!(request.params[0], ("query", "heat".to_string()));
        assert_eq!(request.params[1], ("page", "2".to_string()));
    }
}

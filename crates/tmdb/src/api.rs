//! REST client for the TMDB v3 API.
//!
//! Wraps the movie listing, search, and details endpoints using
//! [`reqwest`]. Responses are returned as raw JSON for the shaper.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CatalogClient;
use crate::endpoint::CatalogRequest;
use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`TmdbApi`].
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    /// Sent as `language` on every call.
    pub language: String,
    /// Whole-request timeout; expiry surfaces as [`CatalogError::Request`].
    pub timeout_secs: u64,
}

impl TmdbConfig {
    /// Load settings from environment variables.
    ///
    /// | Env Var             | Required | Default                         |
    /// |---------------------|----------|---------------------------------|
    /// | `TMDB_API_KEY`      | **yes**  | --                              |
    /// | `TMDB_API_BASE_URL` | no       | `https://api.themoviedb.org/3`  |
    /// | `TMDB_LANGUAGE`     | no       | `en-US`                         |
    /// | `TMDB_TIMEOUT_SECS` | no       | `10`                            |
    ///
    /// # Panics
    ///
    /// Panics if `TMDB_API_KEY` is unset or `TMDB_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("TMDB_API_KEY").expect("TMDB_API_KEY must be set in the environment");

        let base_url = std::env::var("TMDB_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let language = std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.into());

        let timeout_secs: u64 = std::env::var("TMDB_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("TMDB_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            language,
            timeout_secs,
        }
    }
}

/// HTTP client for the TMDB API.
pub struct TmdbApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbApi {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    /// Build a client around an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }
        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            language: config.language,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // ---- private helpers ----

    /// Map non-2xx statuses onto [`CatalogError`] variants.
    async fn ensure_success(
        response: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status.as_u16() {
            401 => Err(CatalogError::Unauthorized),
            404 => Err(CatalogError::NotFound {
                path: path.to_string(),
            }),
            code => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                Err(CatalogError::Api { status: code, body })
            }
        }
    }
}

/// Drop the request URL from transport errors; it carries the API key.
fn redact(err: reqwest::Error) -> CatalogError {
    CatalogError::Request(err.without_url())
}

#[async_trait]
impl CatalogClient for TmdbApi {
    async fn fetch(&self, request: &CatalogRequest) -> Result<Value, CatalogError> {
        let path = request.endpoint.path();
        tracing::debug!(path = %path, params = ?request.params, "Catalog request");

        let response = self
            .client
            .get(self.url(&path))
            .query(&[("api_key", &self.api_key), ("language", &self.language)])
            .query(&request.params)
            .send()
            .await
            .map_err(redact)?;

        let response = Self::ensure_success(response, &path).await?;
        let bytes = response.bytes().await.map_err(redact)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.to_string(),
            base_url: "https://api.example.test/3".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = TmdbApi::new(config("  ")).err().unwrap();
        assert!(matches!(err, CatalogError::NotConfigured(_)));
    }

    #[test]
    fn url_joins_base_and_path() {
        let api = TmdbApi::new(config("key")).unwrap();
        assert_eq!(
            api.url("movie/popular"),
            "https://api.example.test/3/movie/popular"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let mut cfg = config("key");
        cfg.base_url = "http://127.0.0.1:9".to_string();
        let api = TmdbApi::new(cfg).unwrap();

        let err = api
            .fetch(&CatalogRequest::details(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));
        assert!(!err.to_string().contains("api_key"));
    }
}

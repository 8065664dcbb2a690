/// Errors from the catalog HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status other than 401/404.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("Catalog resource not found: {path}")]
    NotFound { path: String },

    /// The configured API key was rejected.
    #[error("Catalog rejected the API key")]
    Unauthorized,

    #[error("Catalog returned unreadable JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Catalog client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

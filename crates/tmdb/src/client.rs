use async_trait::async_trait;
use serde_json::Value;

use crate::endpoint::CatalogRequest;
use crate::error::CatalogError;

/// Source of raw catalog records.
///
/// Each call is a single attempt; failures are returned to the caller
/// without retry.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Perform one catalog request and return the raw JSON body.
    async fn fetch(&self, request: &CatalogRequest) -> Result<Value, CatalogError>;
}

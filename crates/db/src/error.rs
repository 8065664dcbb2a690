use marquee_core::error::CoreError;

/// Errors raised by repositories and the stores built on them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule rejected the operation before it reached storage.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A row disappeared between a write and the read that followed it.
    #[error("Store inconsistency: {0}")]
    Inconsistent(String),
}

/// Domain error taxonomy shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rating must be between 0 and 10, got {0}")]
    InvalidRating(f64),

    /// A raw catalog record lacked a field required for shaping.
    #[error("Malformed catalog record: {0}")]
    MalformedRecord(String),

    /// The catalog could not be reached or answered with an error.
    #[error("Catalog unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

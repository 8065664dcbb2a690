use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::error::CoreError;
use marquee_db::StoreError;
use marquee_tmdb::CatalogError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, store, and catalog errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A failed catalog call that no caller translated further.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No route matched the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

const UPSTREAM_MESSAGE: &str = "The movie catalog is currently unavailable";

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(store) => classify_store_error(store),
            AppError::Catalog(err) => classify_catalog_error(err),

            // --- HTTP-specific errors ---
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::InvalidRating(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_RATING", err.to_string())
        }
        CoreError::MalformedRecord(msg) => {
            tracing::warn!(error = %msg, "Catalog returned a malformed record");
            (StatusCode::BAD_GATEWAY, "MALFORMED_RECORD", err.to_string())
        }
        CoreError::UpstreamUnavailable(msg) => {
            tracing::warn!(error = %msg, "Catalog unavailable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                UPSTREAM_MESSAGE.to_string(),
            )
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn classify_store_error(err: &StoreError) -> Classified {
    match err {
        StoreError::Core(core) => classify_core_error(core),
        StoreError::Database(db) => classify_sqlx_error(db),
        StoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        StoreError::Serialization(_) | StoreError::Inconsistent(_) => {
            tracing::error!(error = %err, "Store error");
            internal()
        }
    }
}

/// Every catalog failure is a 502. A rejected API key is an operator
/// problem, so it is logged at ERROR rather than WARN.
fn classify_catalog_error(err: &CatalogError) -> Classified {
    match err {
        CatalogError::Unauthorized | CatalogError::NotConfigured(_) => {
            tracing::error!(error = %err, "Catalog credentials rejected or missing");
        }
        _ if err.is_timeout() => {
            tracing::warn!(error = %err, "Catalog request timed out");
        }
        _ => {
            tracing::warn!(error = %err, "Catalog request failed");
        }
    }
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_UNAVAILABLE",
        UPSTREAM_MESSAGE.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the request pipeline. Every handler and extractor
/// failure is one of these; the HTTP mapping lives in `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-bounds input, with field-level detail.
    #[error("{0}")]
    Validation(String),

    /// Login failure. One generic message for unknown email and wrong
    /// password alike, so the response does not leak which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No identity presented at all.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Identity presented but rejected: bad token or insufficient role.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Persistence failure. The driver detail is logged, never sent to
    /// the client.
    #[error("database error")]
    Store(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => error!(error = %e, "store error"),
            ApiError::Internal(e) => error!(error = %e, "internal error"),
            _ => {}
        }
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

//! Error types shared across the crate
//!
//! Every fallible operation returns [`Result`]. The [`Error`] enum also
//! knows how to render itself as an HTTP response so axum handlers can
//! bubble it up with `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors produced while fetching, normalizing or serving content
#[derive(Error, Debug)]
pub enum Error {
    /// A CMS document is missing a field the content model requires
    #[error("Malformed document: missing {0}")]
    MalformedDocument(&'static str),

    /// No published document carries the requested uid
    #[error("Post not found: {0}")]
    NotFound(String),

    /// The CMS rejected a preview token
    #[error("Invalid token")]
    InvalidToken,

    /// A pagination cursor does not parse or points outside the repository
    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),

    /// The CMS could not be reached or answered with garbage
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound(uid) => (StatusCode::NOT_FOUND, format!("Post not found: {uid}")),
            Error::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            Error::InvalidCursor(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid pagination cursor".to_string(),
            ),
            Error::Network(e) => {
                tracing::error!("CMS unreachable: {e}");
                (StatusCode::BAD_GATEWAY, "Upstream CMS error".to_string())
            }
            other => {
                tracing::error!("Internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

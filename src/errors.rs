use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Every rejected precondition maps to exactly one variant; collaborator
/// failures (store, config, io, token signing) are carried through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Unauthorized | Error::Token(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Database(_) | Error::Migrate(_) | Error::Config(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Error::Validation(msg) => {
                tracing::warn!(message = %msg, "request rejected by validation");
                ErrorBody {
                    error: "validation failed".into(),
                    details: Some(msg.clone()),
                }
            }
            Error::Unauthorized | Error::Token(_) => {
                tracing::warn!("request without valid credentials");
                ErrorBody {
                    error: "authentication required".into(),
                    details: None,
                }
            }
            Error::Forbidden(what) => {
                tracing::warn!(reason = what, "request forbidden");
                ErrorBody {
                    error: "forbidden".into(),
                    details: Some((*what).into()),
                }
            }
            Error::NotFound(entity) => ErrorBody {
                error: format!("{entity} not found"),
                details: None,
            },
            Error::Conflict(what) => {
                tracing::warn!(reason = what, "request conflicts with current state");
                ErrorBody {
                    error: "conflict".into(),
                    details: Some((*what).into()),
                }
            }
            other => {
                // internals are logged but never leaked to the client
                tracing::error!(error = %other, "internal error");
                ErrorBody {
                    error: "internal server error".into(),
                    details: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

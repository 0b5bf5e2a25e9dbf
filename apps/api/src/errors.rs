use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cms::CmsError;
use crate::extract::ExtractError;
use crate::llm_client::LlmError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Client errors carry their message to the caller. Every server error
/// returns the same generic body and is logged here with its detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{service} error (status {status:?}): {message}")]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed model output: {reason}")]
    MalformedModelOutput { reason: String, raw: String },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Wrong type for field '{field}': expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CmsError> for AppError {
    fn from(e: CmsError) -> Self {
        let status = match &e {
            CmsError::Api { status, .. } => Some(*status),
            CmsError::Http(err) => err.status().map(|s| s.as_u16()),
            CmsError::Parse(_) => None,
        };
        AppError::Upstream {
            service: "CMS",
            status,
            message: e.to_string(),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        let status = match &e {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Http(err) => err.status().map(|s| s.as_u16()),
            LlmError::Parse(_) | LlmError::EmptyContent => None,
        };
        AppError::Upstream {
            service: "LLM",
            status,
            message: e.to_string(),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::MalformedModelOutput { reason, raw } => {
                AppError::MalformedModelOutput { reason, raw }
            }
            ExtractError::MissingField(field) => AppError::MissingField(field),
            ExtractError::WrongType { field, expected } => AppError::WrongType { field, expected },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream {
                service,
                status,
                message,
            } => {
                tracing::error!("{service} upstream error (status {status:?}): {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::MalformedModelOutput { reason, raw } => {
                tracing::error!("Malformed model output ({reason}). Raw text: {raw}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::MissingField(_) | AppError::WrongType { .. } => {
                tracing::error!("Model output failed schema validation: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    UpstreamStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid request")]
    InvalidRequest,

    #[error("{message}")]
    RequestBodyError { status: StatusCode, message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest => StatusCode::BAD_REQUEST,
            ProxyError::RequestBodyError { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for ProxyError {
    fn from(err: tokio::task::JoinError) -> Self {
        let message = if err.is_panic() {
            "lookup task panicked".to_string()
        } else {
            err.to_string()
        };
        ProxyError::InternalError { message }
    }
}

/// Failure envelope shared by every endpoint: `{success: false, error}`.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Error kinds for one invocation of the bridge. Business failures
/// (insufficient stock) are not errors and never appear here; see
/// `models::order::SubmissionOutcome`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Queue {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(context: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { context, source }
    }

    pub fn decode(context: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { context, source }
    }

    pub fn queue(context: &'static str, source: anyhow::Error) -> Self {
        Self::Queue { context, source }
    }

    /// Stable machine-readable code returned to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Transport { .. } => "transport_error",
            Self::Decode { .. } => "decode_error",
            Self::Queue { .. } => "queue_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller. Validation messages name the
    /// offending field; everything else stays generic and the detail goes
    /// to the logs only.
    fn public_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Transport { .. } => "upstream request failed".to_string(),
            Self::Decode { .. } => "upstream response could not be decoded".to_string(),
            Self::Queue { .. } => "message queue publish failed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation { message } => {
                warn!(code = self.code(), detail = %message, "Request rejected");
            }
            other => {
                error!(code = other.code(), detail = %other, "Invocation failed");
            }
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_kernel::error::format_context;
use roster_kernel::server::MessageResponse;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Character slice error type. Every variant renders as a `{ "message": ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    /// No record with the requested id. `message` is the exact text returned to the caller.
    #[error("{message}")]
    NotFound { id: String, message: &'static str },

    /// The request body is not a JSON object or array.
    #[error("Malformed request body{}: {message}", format_context(.context.as_ref()))]
    MalformedBody { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The body could not be read at all (too large, broken stream).
    #[error("Unreadable request body ({status}): {message}")]
    UnreadableBody { status: StatusCode, message: String },
}

impl CharacterError {
    pub fn not_found(id: impl Into<String>, message: &'static str) -> Self {
        Self::NotFound { id: id.into(), message }
    }

    pub fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedBody { message: message.into(), context: None }
    }

    pub fn unreadable(status: StatusCode, message: impl Into<String>) -> Self {
        Self::UnreadableBody { status, message: message.into() }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::UnreadableBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for CharacterError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound { id, message } => {
                debug!(%id, "Character not found");
                MessageResponse::new(message).with_status(status)
            }
            Self::MalformedBody { message, .. } => {
                debug!(%message, "Rejected request body");
                MessageResponse::new(message).with_status(status)
            }
            Self::UnreadableBody { message, .. } => {
                warn!(%status, %message, "Failed to read request body");
                MessageResponse::new(message).with_status(status)
            }
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_domain::constants::MSG_RESOURCE_NOT_FOUND;
use serde::Serialize;
use std::borrow::Cow;

/// `{ "message": ... }` envelope used by every response that carries no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String, example = "Character not found")]
    pub message: Cow<'static, str>,
}

impl MessageResponse {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self { message: message.into() }
    }

    /// Pairs the envelope with a status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Catch-all for unknown paths and unsupported methods.
#[allow(clippy::unused_async)]
pub async fn not_found_fallback() -> Response {
    MessageResponse::new(MSG_RESOURCE_NOT_FOUND).with_status(StatusCode::NOT_FOUND)
}

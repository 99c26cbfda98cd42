//! Request body extraction and sanitization.

use crate::error::CharacterError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use roster_kernel::domain::character::CharacterInput;
use serde_json::Value;

/// Request body projected onto the character allow-list.
///
/// Only `application/json` bodies are read; any other (or missing) `Content-Type`
/// counts as `{}`, as does an empty body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sanitized(pub CharacterInput);

impl<S> FromRequest<S> for Sanitized
where
    S: Send + Sync,
{
    type Rejection = CharacterError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CharacterError::unreadable(e.status(), e.body_text()))?;

        sanitize_body(&bytes).map(Self)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Parses raw body bytes and keeps only the allow-listed fields.
///
/// Arrays carry no named fields and project to an empty input.
///
/// # Errors
/// Returns [`CharacterError::MalformedBody`] for invalid JSON or a scalar top-level value.
pub fn sanitize_body(bytes: &[u8]) -> Result<CharacterInput, CharacterError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(CharacterInput::default());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(CharacterInput::sanitize(map)),
        Ok(Value::Array(_)) => Ok(CharacterInput::default()),
        Ok(_) => Err(CharacterError::malformed("request body must be a JSON object or array")),
        Err(e) => Err(CharacterError::malformed(e.to_string())),
    }
}

use crate::error::CharacterError;
use crate::models::{CharacterData, CharacterList, CharacterMessage};
use crate::payload::Sanitized;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use roster_kernel::domain::character::CharacterInput;
use roster_kernel::domain::constants::{
    CHARACTERS_TAG, MSG_CREATED, MSG_DELETED, MSG_GET_NOT_FOUND, MSG_NOT_FOUND, MSG_UPDATED,
};
use roster_kernel::server::MessageResponse;
use roster_kernel::store::CharacterStore;
use tracing::info;

#[allow(clippy::unused_async)]
#[utoipa::path(
    get,
    path = "/api/characters",
    responses((status = OK, description = "Every character in insertion order", body = CharacterList)),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn list_characters(State(store): State<CharacterStore>) -> Json<CharacterList> {
    Json(CharacterList { data: store.list() })
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    get,
    path = "/api/characters/{id}",
    params(("id" = String, Path, description = "Character id")),
    responses(
        (status = OK, description = "The character", body = CharacterData),
        (status = NOT_FOUND, description = "Unknown id", body = MessageResponse),
    ),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn get_character(
    State(store): State<CharacterStore>,
    Path(id): Path<String>,
) -> Result<Json<CharacterData>, CharacterError> {
    store
        .get(&id)
        .map(|data| Json(CharacterData { data }))
        .ok_or_else(|| CharacterError::not_found(id, MSG_GET_NOT_FOUND))
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    post,
    path = "/api/characters",
    request_body = CharacterInput,
    responses(
        (status = CREATED, description = "Character registered", body = CharacterMessage),
        (status = BAD_REQUEST, description = "Body is invalid JSON or a scalar", body = MessageResponse),
    ),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn create_character(
    State(store): State<CharacterStore>,
    Sanitized(input): Sanitized,
) -> (StatusCode, Json<CharacterMessage>) {
    let data = store.create(input);
    info!(id = %data.id, "Character created");

    (StatusCode::CREATED, Json(CharacterMessage { message: MSG_CREATED, data }))
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    put,
    path = "/api/characters/{id}",
    params(("id" = String, Path, description = "Character id")),
    request_body = CharacterInput,
    responses(
        (status = OK, description = "Supplied fields merged onto the character", body = CharacterMessage),
        (status = NOT_FOUND, description = "Unknown id", body = MessageResponse),
        (status = BAD_REQUEST, description = "Body is invalid JSON or a scalar", body = MessageResponse),
    ),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn replace_character(
    State(store): State<CharacterStore>,
    Path(id): Path<String>,
    Sanitized(input): Sanitized,
) -> Result<Json<CharacterMessage>, CharacterError> {
    merge(&store, id, input)
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    patch,
    path = "/api/characters/{id}",
    params(("id" = String, Path, description = "Character id")),
    request_body = CharacterInput,
    responses(
        (status = OK, description = "Supplied fields merged onto the character", body = CharacterMessage),
        (status = NOT_FOUND, description = "Unknown id", body = MessageResponse),
        (status = BAD_REQUEST, description = "Body is invalid JSON or a scalar", body = MessageResponse),
    ),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn patch_character(
    State(store): State<CharacterStore>,
    Path(id): Path<String>,
    Sanitized(input): Sanitized,
) -> Result<Json<CharacterMessage>, CharacterError> {
    merge(&store, id, input)
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    delete,
    path = "/api/characters/{id}",
    params(("id" = String, Path, description = "Character id")),
    responses(
        (status = OK, description = "Character removed", body = MessageResponse),
        (status = NOT_FOUND, description = "Unknown id", body = MessageResponse),
    ),
    tag = CHARACTERS_TAG,
)]
pub(crate) async fn delete_character(
    State(store): State<CharacterStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CharacterError> {
    match store.delete(&id) {
        Some(removed) => {
            info!(id = %removed.id, "Character deleted");
            Ok(Json(MessageResponse::new(MSG_DELETED)))
        }
        None => Err(CharacterError::not_found(id, MSG_NOT_FOUND)),
    }
}

// PUT and PATCH share merge semantics: supplied fields overwrite, the rest stay.
fn merge(
    store: &CharacterStore,
    id: String,
    input: CharacterInput,
) -> Result<Json<CharacterMessage>, CharacterError> {
    let Some(data) = store.update(&id, input) else {
        return Err(CharacterError::not_found(id, MSG_NOT_FOUND));
    };
    info!(id = %data.id, "Character updated");

    Ok(Json(CharacterMessage { message: MSG_UPDATED, data }))
}

//! Character registry slice.
//!
//! Exposes `/api/characters` (list, get, create, replace, patch, delete) over the
//! kernel's [`CharacterStore`](roster_kernel::store::CharacterStore). Request bodies are
//! sanitized to the allow-listed fields before they touch the store.
//!
//! ```rust,ignore
//! let (router, api) = roster_characters::router().with_state(state).split_for_parts();
//! ```

mod error;
mod handlers;
pub mod models;
pub mod payload;

pub use error::CharacterError;
pub use payload::{Sanitized, sanitize_body};

use roster_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes for the character collection, with their `OpenAPI` metadata.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_characters, handlers::create_character))
        .routes(routes!(
            handlers::get_character,
            handlers::replace_character,
            handlers::patch_character,
            handlers::delete_character
        ))
}

//! Common imports for slices and applications.

pub use crate::domain::character::{Character, CharacterInput};
pub use crate::domain::config::ApiConfig;
#[cfg(feature = "server")]
pub use crate::server::{ApiState, MessageResponse};
pub use crate::store::CharacterStore;

//! Response envelopes for the character endpoints.

use roster_kernel::domain::character::Character;
use serde::Serialize;

/// `{ data: Character[] }`
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CharacterList {
    pub data: Vec<Character>,
}

/// `{ data: Character }`
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CharacterData {
    pub data: Character,
}

/// `{ message, data: Character }`, returned by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CharacterMessage {
    #[schema(example = "Character created")]
    pub message: &'static str,
    pub data: Character,
}

//! Wire-level constants shared by the server and its tests.

/// `OpenAPI` tags.
pub const CHARACTERS_TAG: &str = "Characters";
pub const SYSTEM_TAG: &str = "System";

// Response messages. The spelling is part of the public contract.
pub const MSG_CREATED: &str = "Character created";
pub const MSG_UPDATED: &str = "Character update successfully";
pub const MSG_DELETED: &str = "Character deleted successfuly";
pub const MSG_GET_NOT_FOUND: &str = "character not found!";
pub const MSG_NOT_FOUND: &str = "Character not found";
pub const MSG_RESOURCE_NOT_FOUND: &str = "Resource not found";

/// Identifier of the record every fresh server starts with.
pub const SEED_CHARACTER_ID: &str = "a02b91bc-3769-4221-beb1-d7a3aeba7dad";

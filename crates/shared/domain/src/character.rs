//! The character record and the allow-list used to build and patch it.
//!
//! Caller-supplied fields are stored exactly as received: a `level` sent as a
//! string stays a string. Each field is an `Option<Value>` where `None` means
//! "never supplied" (omitted from JSON) and `Some(Value::Null)` is an explicit
//! `null`.

use crate::constants::SEED_CHARACTER_ID;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// A registered character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Server-assigned identifier. Never changes once issued.
    pub id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "Yoda"))]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "Jedi"))]
    pub character_class: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 50))]
    pub level: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 80))]
    pub hp: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 120))]
    pub mana: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 15))]
    pub attack: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<Vec<String>>))]
    pub items: Option<Value>,
}

impl Character {
    /// Builds a record from sanitized input. Fields absent from `input` stay unset.
    #[must_use]
    pub fn new(id: impl Into<String>, input: CharacterInput) -> Self {
        let CharacterInput { name, character_class, level, hp, mana, attack, items } = input;
        Self { id: id.into(), name, character_class, level, hp, mana, attack, items }
    }

    /// Shallow-merges `input` onto this record.
    ///
    /// Supplied fields overwrite, everything else (including `id`) is left untouched.
    pub fn merge(&mut self, input: CharacterInput) {
        let CharacterInput { name, character_class, level, hp, mana, attack, items } = input;

        overwrite(&mut self.name, name);
        overwrite(&mut self.character_class, character_class);
        overwrite(&mut self.level, level);
        overwrite(&mut self.hp, hp);
        overwrite(&mut self.mana, mana);
        overwrite(&mut self.attack, attack);
        overwrite(&mut self.items, items);
    }

    /// The record a freshly booted registry is seeded with.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            id: SEED_CHARACTER_ID.to_owned(),
            name: Some(json!("Darth Vader")),
            character_class: Some(json!("Sith")),
            level: Some(json!(10)),
            hp: Some(json!(100)),
            mana: Some(json!(20)),
            attack: Some(json!(10)),
            items: Some(json!(["Ligthsaber", "Death start"])),
        }
    }
}

fn overwrite(slot: &mut Option<Value>, value: Option<Value>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Sanitized request payload: only the fields a caller is allowed to set.
///
/// There is deliberately no `id` here, so no request can ever assign or
/// rewrite an identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CharacterInput {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "Yoda"))]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "Jedi"))]
    pub character_class: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 50))]
    pub level: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 80))]
    pub hp: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 120))]
    pub mana: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>, example = 15))]
    pub attack: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<Vec<String>>))]
    pub items: Option<Value>,
}

impl CharacterInput {
    /// Projects an arbitrary JSON object onto the allow-list.
    ///
    /// Unknown keys (including `id`) are dropped; keys that were not supplied stay `None`.
    #[must_use]
    pub fn sanitize(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            character_class: body.remove("characterClass"),
            level: body.remove("level"),
            hp: body.remove("hp"),
            mana: body.remove("mana"),
            attack: body.remove("attack"),
            items: body.remove("items"),
        }
    }

    /// `true` when no allow-listed field was supplied; merging such an input is a no-op.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.character_class.is_none()
            && self.level.is_none()
            && self.hp.is_none()
            && self.mana.is_none()
            && self.attack.is_none()
            && self.items.is_none()
    }
}

// Keeps an explicit `null` as `Some(Value::Null)`; `#[serde(default)]` covers the missing case.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

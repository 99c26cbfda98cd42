//! In-memory character registry.
//!
//! The collection is an ordered `Vec` behind a `parking_lot::RwLock`. Every read
//! and mutation takes the lock for the duration of the in-memory operation only,
//! so concurrent requests observe the same ordering a single-threaded loop would.

use crate::error::format_context;
use crate::safe_nanoid;
use parking_lot::RwLock;
use roster_domain::character::{Character, CharacterInput};
use roster_domain::config::CharactersConfig;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate character id{}: {id}", format_context(.context.as_ref()))]
    DuplicateId { id: String, context: Option<Cow<'static, str>> },
}

/// Shared handle to the ordered character collection. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct CharacterStore {
    inner: Arc<RwLock<Vec<Character>>>,
}

impl CharacterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated in iteration order.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if two records share an id.
    pub fn with_characters<I>(characters: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Character>,
    {
        let store = Self::new();
        for character in characters {
            store.insert(character)?;
        }
        Ok(store)
    }

    /// Builds the boot-time roster described by configuration.
    ///
    /// Seeds whose fixed id is already taken are skipped with a warning.
    #[must_use]
    pub fn seeded(config: &CharactersConfig) -> Self {
        let store = Self::new();

        if config.seed_defaults {
            let starter = Character::starter();
            debug!(id = %starter.id, "Seeding starter character");
            store.inner.write().push(starter);
        }

        for seed in &config.seed {
            let fields = seed.fields.clone();
            match &seed.id {
                Some(id) if store.contains(id) => {
                    warn!(%id, "Skipping configured character with a duplicate id");
                }
                Some(id) => store.inner.write().push(Character::new(id.clone(), fields)),
                None => {
                    store.create(fields);
                }
            }
        }

        store
    }

    /// Snapshot of every record in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Character> {
        self.inner.read().clone()
    }

    /// First record whose id matches.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Character> {
        self.inner.read().iter().find(|c| c.id == id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().iter().any(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Appends a new record built from `input` under a freshly generated id.
    pub fn create(&self, input: CharacterInput) -> Character {
        let mut characters = self.inner.write();

        let mut id = safe_nanoid!();
        while characters.iter().any(|c| c.id == id) {
            id = safe_nanoid!();
        }

        let character = Character::new(id, input);
        characters.push(character.clone());
        character
    }

    /// Appends a record that already carries its id.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is already registered.
    pub fn insert(&self, character: Character) -> Result<(), StoreError> {
        let mut characters = self.inner.write();
        if characters.iter().any(|c| c.id == character.id) {
            return Err(StoreError::DuplicateId { id: character.id, context: None });
        }
        characters.push(character);
        Ok(())
    }

    /// Merges `input` onto the record with `id`. Returns the updated record, or `None` if absent.
    pub fn update(&self, id: &str, input: CharacterInput) -> Option<Character> {
        let mut characters = self.inner.write();
        let character = characters.iter_mut().find(|c| c.id == id)?;
        character.merge(input);
        Some(character.clone())
    }

    /// Removes exactly one record, keeping the rest in order. Returns it, or `None` if absent.
    pub fn delete(&self, id: &str) -> Option<Character> {
        let mut characters = self.inner.write();
        let idx = characters.iter().position(|c| c.id == id)?;
        Some(characters.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::config::CharacterSeed;
    use roster_domain::constants::SEED_CHARACTER_ID;
    use serde_json::json;

    fn named(name: &str) -> CharacterInput {
        CharacterInput { name: Some(json!(name)), ..CharacterInput::default() }
    }

    #[test]
    fn create_appends_in_order() {
        let store = CharacterStore::new();
        let a = store.create(named("a"));
        let b = store.create(named("b"));

        let ids: Vec<_> = store.list().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn clones_share_state() {
        let store = CharacterStore::new();
        let handle = store.clone();
        store.create(named("a"));

        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn update_missing_returns_none() {
        let store = CharacterStore::new();
        assert!(store.update("nope", named("x")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_missing_leaves_collection() {
        let store = CharacterStore::new();
        store.create(named("a"));

        assert!(store.delete("nope").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let store = CharacterStore::with_characters([Character::starter()]).unwrap();
        let err = store.insert(Character::starter()).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId { ref id, .. } if id == SEED_CHARACTER_ID));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seeded_respects_config() {
        let config = CharactersConfig {
            seed_defaults: true,
            seed: vec![
                CharacterSeed { id: Some("yoda".to_owned()), fields: named("Yoda") },
                CharacterSeed { id: Some(SEED_CHARACTER_ID.to_owned()), fields: named("Clash") },
                CharacterSeed { id: None, fields: named("Rey") },
            ],
        };

        let store = CharacterStore::seeded(&config);
        let list = store.list();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0], Character::starter());
        assert_eq!(list[1].id, "yoda");
        assert!(store.contains(SEED_CHARACTER_ID));
        assert_eq!(list[2].name, Some(json!("Rey")));
    }

    #[test]
    fn seeded_without_defaults_is_empty() {
        let config = CharactersConfig { seed_defaults: false, seed: Vec::new() };
        assert!(CharacterStore::seeded(&config).is_empty());
    }
}

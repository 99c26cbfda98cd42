use crate::error::format_context;
use crate::store::CharacterStore;
use axum::extract::FromRef;
use roster_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context.as_ref()))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub characters: CharacterStore,
}

/// Cheaply clonable application state handed to every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for CharacterStore {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.characters.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    characters: Option<CharacterStore>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Injects an existing store. Without one, the store is seeded from the config.
    #[must_use]
    pub fn characters(mut self, characters: CharacterStore) -> Self {
        self.characters = Some(characters);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] if no configuration was provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;
        let characters =
            self.characters.unwrap_or_else(|| CharacterStore::seeded(&config.characters));

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, characters }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_config() {
        let err = ApiState::builder().build().unwrap_err();
        assert!(err.to_string().contains("ApiConfig not provided"));
    }

    #[test]
    fn default_store_is_seeded_from_config() {
        let state = ApiState::builder().config(ApiConfig::default()).build().unwrap();
        assert_eq!(state.characters.len(), 1);
    }

    #[test]
    fn injected_store_is_shared() {
        let store = CharacterStore::new();
        let state =
            ApiState::builder().config(ApiConfig::default()).characters(store.clone()).build().unwrap();

        let extracted = CharacterStore::from_ref(&state);
        extracted.create(roster_domain::character::CharacterInput::default());
        assert_eq!(store.len(), 1);
    }
}

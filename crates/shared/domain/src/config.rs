use crate::character::CharacterInput;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level service configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub characters: CharactersConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Expose `GET /health`.
    pub health: bool,
    /// Expose the `OpenAPI` document and Scalar UI under `/docs`.
    pub docs: bool,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Extra module directives, e.g. `roster=debug,tower_http=info`.
    pub env_filter: Option<String>,
    /// Directory for rolling log files. Console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Character registry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CharactersConfig {
    /// Register the built-in starter character on boot.
    pub seed_defaults: bool,
    /// Additional characters registered on boot, in order.
    pub seed: Vec<CharacterSeed>,
}

/// A character declared in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterSeed {
    /// Fixed identifier; a fresh one is generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: CharacterInput,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3000, health: false, docs: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), env_filter: None, path: None, json: false, max_files: 10 }
    }
}

impl Default for CharactersConfig {
    fn default() -> Self {
        Self { seed_defaults: true, seed: Vec::new() }
    }
}

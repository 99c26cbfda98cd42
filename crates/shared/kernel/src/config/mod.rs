use crate::error::format_context;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Default configuration file stem, resolved against the working directory (`roster.toml`, ...).
pub const DEFAULT_CONFIG: &str = "roster";
/// Prefix for environment overrides (`ROSTER__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "ROSTER";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context.as_ref()))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to results produced by the `config` crate.
pub trait ConfigErrorExt<T> {
    /// Wraps the error and attaches a short description of what was being attempted.
    ///
    /// # Errors
    /// Returns the original error wrapped in [`ConfigError::Config`].
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: whatever `T` produces for missing keys (use `#[serde(default)]`).
/// 2. **File**: `path` when given (must exist), otherwise the optional `roster.*` file in the
///    working directory.
/// 3. **Environment**: variables prefixed with `ROSTER__`; nested keys use double underscores
///    (`ROSTER__SERVER__PORT` maps to `server.port`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged settings do not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use roster_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layers(path.as_ref().map(AsRef::as_ref), environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true)
}

fn load_layers<T>(path: Option<&Path>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = path.map_or_else(
        || {
            info!("Loading config from optional {DEFAULT_CONFIG}.* file");
            File::with_name(DEFAULT_CONFIG).required(false)
        },
        |p| {
            info!("Loading config from {}", p.display());
            File::from(p).required(true)
        },
    );

    let config = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

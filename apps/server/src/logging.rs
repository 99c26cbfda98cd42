use anyhow::{Context, Result};
use roster_kernel::domain::config::LoggingConfig;
use roster_logger::{Logger, parse_level};

/// Installs the global subscriber described by the `[logging]` section.
///
/// # Errors
/// Returns an error for an unknown level, an invalid filter, an unusable log
/// directory, or when a subscriber is already installed.
pub fn init_logging(name: &str, cfg: &LoggingConfig) -> Result<Logger> {
    let mut builder = Logger::builder(name)
        .level(parse_level(&cfg.level)?)
        .max_files(cfg.max_files)
        .json(cfg.json);

    if let Some(filter) = &cfg.env_filter {
        builder = builder.env_filter(filter);
    }
    if let Some(path) = &cfg.path {
        builder = builder.path(path);
    }

    builder.init().context("Failed to initialize logging")
}

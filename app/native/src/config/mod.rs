//! Configuration module for Salah.
//!
//! This module provides configuration types and loading functionality.
//! The configuration is loaded once per run by the CLI and handed to each
//! component explicitly.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod env;
pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, ImagesConfig, LabelsConfig, OverlayConfig, PublisherBackend, PublisherConfig,
    SalahConfig, ScheduleConfig, ScreenConfig, config_paths, load_config as load_config_default,
    load_config_from_path, parse_hex_color,
};

use crate::platform::path::expand_and_resolve;

/// A configuration together with the file it was read from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: SalahConfig,
    /// Path of the configuration file, if one was found.
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Wraps an in-memory configuration anchored at `path`.
    #[must_use]
    pub const fn new(config: SalahConfig, path: Option<PathBuf>) -> Self { Self { config, path } }

    /// Returns the directory relative paths in the configuration are resolved against.
    ///
    /// This is the configuration file's directory, or the preferred configuration
    /// directory when running on defaults.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(|| config_paths().into_iter().next())
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Expands `~` and resolves a configured path against [`Self::base_dir`].
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf { expand_and_resolve(path, &self.base_dir()) }
}

/// Loads the configuration.
///
/// A custom path must exist. Without one, the default search paths are tried
/// and a missing file yields the default configuration.
///
/// # Errors
///
/// Returns an error if the custom file is missing, or if a configuration file
/// exists but cannot be read or parsed.
pub fn load(custom_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let result = custom_path.map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(LoadedConfig::new(config, Some(path)))
        }
        Err(ConfigError::NotFound) if custom_path.is_none() => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(LoadedConfig::default())
        }
        Err(err) => Err(err),
    }
}

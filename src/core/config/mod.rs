//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Two configuration scopes:
//! - **Global**: User-level settings
//! - **Store**: Settings for one page store, overriding global
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Store config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$PAGETREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/pagetree/config.toml`
//! 3. `~/.pagetree/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use pagetree::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/srv/site"))).unwrap();
//!
//! println!("Template: {}", config.default_template());
//! println!("Conflicts: {}", config.path_conflict());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, PathConflictPolicy, StoreConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::page::DEFAULT_TEMPLATE;
use crate::core::paths::StorePaths;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: store config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Store configuration (if a store was given and has one)
    pub store: Option<StoreConfig>,
    global_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `store_root` is provided, also loads that store's config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// fail validation. Missing files are not an error.
    pub fn load(store_root: Option<&Path>) -> Result<Config, ConfigError> {
        Self::load_with(Self::locate_global().as_deref(), store_root)
    }

    /// Load configuration from an explicit global config file.
    pub fn load_with(
        global_file: Option<&Path>,
        store_root: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let (global, global_path) = match global_file {
            Some(path) if path.exists() => (read_toml::<GlobalConfig>(path)?, Some(path.into())),
            _ => (GlobalConfig::default(), None),
        };

        let (store, store_path) = match store_root {
            Some(root) => {
                let path = StorePaths::new(root).config_path();
                if path.exists() {
                    (Some(read_toml::<StoreConfig>(&path)?), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref s) = store {
            s.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            store = ?store_path,
            "loaded configuration"
        );

        Ok(Config {
            global,
            store,
            global_path,
            store_path,
        })
    }

    /// First existing global config file in search order.
    fn locate_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PAGETREE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("pagetree/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".pagetree/config.toml"))
            .filter(|path| path.exists())
    }

    /// Write a store config atomically.
    ///
    /// Creates the store directory if needed.
    pub fn write_store(store_root: &Path, config: &StoreConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = StorePaths::new(store_root).config_path();
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Store used when none is given on the command line.
    pub fn default_store(&self) -> Option<&Path> {
        self.global.default_store.as_deref()
    }

    /// Template for new pages.
    ///
    /// Defaults to `page.html` if not configured.
    pub fn default_template(&self) -> &str {
        self.store
            .as_ref()
            .and_then(|s| s.default_template.as_deref())
            .or(self.global.default_template.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Path conflict policy.
    ///
    /// Defaults to [`PathConflictPolicy::Reject`] if not configured.
    pub fn path_conflict(&self) -> PathConflictPolicy {
        self.store
            .as_ref()
            .and_then(|s| s.path_conflict)
            .or(self.global.path_conflict)
            .unwrap_or_default()
    }

    /// Path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path to the loaded store config file.
    pub fn store_config_loaded_from(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    move |source| ConfigError::WriteError { path, source }
}

/// Write to a temp file in the same directory, then rename over `path`.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error(path))?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(write_error(&temp_path))?;
    file.write_all(contents.as_bytes())
        .map_err(write_error(&temp_path))?;
    file.sync_all().map_err(write_error(&temp_path))?;

    fs::rename(&temp_path, path).map_err(write_error(path))?;
    Ok(())
}

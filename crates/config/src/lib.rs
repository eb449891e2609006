//! Bookshelf Configuration System
//!
//! Settings live in a single TOML file with one table per section. Every
//! section implements [`ConfigSection`], so validation and merging are
//! uniform across the tree.
//!
//! # Architecture
//!
//! - **Trait-based**: each section is a type implementing `ConfigSection`
//! - **Graceful degradation**: a missing file yields defaults; invalid values are reported
//! - **Atomic writes**: the config file is never left half-written
//! - **Override chain**: defaults < file < environment < command line
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|_| Config::default());
//!
//! println!("Loading books from {:?}", config.catalog.source_path);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
mod app_config;
mod catalog_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_overrides, env_var_name, ConfigManager, ENV_PREFIX};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, ColorChoice, LogLevel};
pub use catalog_config::{CatalogConfig, MalformedPolicy};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Catalog source and load behaviour
    pub catalog: CatalogConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.version != CONFIG_VERSION {
            errors.push(ValidationError::with_value(
                "version",
                format!("unsupported format version, expected {}", CONFIG_VERSION),
                self.version,
            ));
        }

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.catalog.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.catalog.merge(other.catalog);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

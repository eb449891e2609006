//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{
    Config, ConfigError, ConfigResult, ConfigSection, LogLevel, MalformedPolicy, ValidationError,
};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "BOOKSHELF_";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration manager
///
/// Owns the config file location and exposes load/save/update on top of
/// [`ConfigPersistence`].
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/bookshelf/`
    /// - macOS: `~/Library/Application Support/bookshelf/`
    /// - Windows: `%APPDATA%\bookshelf\config\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE_NAME));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "bookshelf")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::NoConfigDirectory {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.persistence.config_path().to_path_buf()
    }

    /// Loads the configuration from file, or defaults if the file is missing
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Validates and atomically saves the configuration
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `update_fn`, and saves
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        log::info!("Generated default config at {}", self.config_path().display());
        Ok(true)
    }

    /// Overwrites the config file with default values
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns every validation message, empty when valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }
}

/// Environment variable that overrides `field` of `section`
///
/// `env_var_name(&config.catalog, "source_path")` is `BOOKSHELF_CATALOG_SOURCE_PATH`.
pub fn env_var_name<S: ConfigSection>(section: &S, field: &str) -> String {
    format!("{}{}_{}", ENV_PREFIX, section.section_name(), field).to_ascii_uppercase()
}

/// Applies `BOOKSHELF_*` overrides read through `lookup`
///
/// Values that do not parse leave the setting unchanged and are returned,
/// keyed by variable name, for the caller to report.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Vec<ValidationError>
where
    F: Fn(&str) -> Option<String>,
{
    let source_var = env_var_name(&config.catalog, "source_path");
    let policy_var = env_var_name(&config.catalog, "on_malformed");
    let level_var = env_var_name(&config.app, "log_level");
    let mut rejected = Vec::new();

    if let Some(path) = lookup(&source_var) {
        config.catalog.source_path = if path.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        };
    }

    if let Some(policy) = lookup(&policy_var) {
        match policy.parse::<MalformedPolicy>() {
            Ok(p) => config.catalog.on_malformed = p,
            Err(e) => rejected.push(ValidationError::with_value(policy_var, e.message, policy)),
        }
    }

    if let Some(level) = lookup(&level_var) {
        match level.parse::<LogLevel>() {
            Ok(l) => config.app.log_level = l,
            Err(e) => rejected.push(ValidationError::with_value(level_var, e.message, level)),
        }
    }

    rejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_update() {
        let (_temp_dir, manager) = setup_test_manager();
        manager.save(&Config::default()).expect("Should save");

        manager
            .update(|config| {
                config.catalog.on_malformed = MalformedPolicy::Skip;
            })
            .expect("Should update");

        let loaded = manager.load().expect("Should load");
        assert_eq!(loaded.catalog.on_malformed, MalformedPolicy::Skip);
    }

    #[test]
    fn test_initialize_creates_file_once() {
        let (_temp_dir, manager) = setup_test_manager();

        assert!(manager.initialize().expect("Should initialize"));
        assert!(manager.config_path().exists());
        assert!(!manager.initialize().expect("Should initialize"));
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.app.log_level = LogLevel::Trace;
        manager.save(&config).expect("Should save");

        manager.reset().expect("Should reset");
        assert_eq!(manager.load().expect("Should load"), Config::default());
    }

    #[test]
    fn test_validate_reports_problems() {
        let (temp_dir, manager) = setup_test_manager();
        let dir_path = temp_dir.path().display().to_string().replace('\\', "/");
        std::fs::write(
            manager.config_path(),
            format!("[catalog]\nsource_path = \"{}\"\n", dir_path),
        )
        .expect("Should write");

        let errors = manager.validate().expect("Should validate");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("catalog.source_path"));
    }

    #[test]
    fn test_overrides_apply_all_fields() {
        let mut config = Config::default();
        let rejected = apply_overrides(
            &mut config,
            env(&[
                ("BOOKSHELF_CATALOG_SOURCE_PATH", "/srv/books.txt"),
                ("BOOKSHELF_CATALOG_ON_MALFORMED", "skip"),
                ("BOOKSHELF_APP_LOG_LEVEL", "debug"),
            ]),
        );

        assert!(rejected.is_empty());
        assert_eq!(
            config.catalog.source_path,
            Some(PathBuf::from("/srv/books.txt"))
        );
        assert_eq!(config.catalog.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.app.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_overrides_report_bad_values() {
        let mut config = Config::default();
        let rejected = apply_overrides(
            &mut config,
            env(&[
                ("BOOKSHELF_CATALOG_ON_MALFORMED", "explode"),
                ("BOOKSHELF_APP_LOG_LEVEL", "loud"),
            ]),
        );

        assert_eq!(config, Config::default());
        let fields: Vec<&str> = rejected.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["BOOKSHELF_CATALOG_ON_MALFORMED", "BOOKSHELF_APP_LOG_LEVEL"]
        );
        assert_eq!(rejected[0].value.as_deref(), Some("explode"));
    }

    #[test]
    fn test_env_var_names_follow_sections() {
        let config = Config::default();
        assert_eq!(
            env_var_name(&config.catalog, "on_malformed"),
            "BOOKSHELF_CATALOG_ON_MALFORMED"
        );
        assert_eq!(env_var_name(&config.app, "log_level"), "BOOKSHELF_APP_LOG_LEVEL");
    }

    #[test]
    fn test_blank_source_override_clears_path() {
        let mut config = Config::default();
        config.catalog.source_path = Some(PathBuf::from("books.txt"));
        apply_overrides(&mut config, env(&[("BOOKSHELF_CATALOG_SOURCE_PATH", " ")]));
        assert!(config.catalog.source_path.is_none());
    }

    #[test]
    fn test_config_file_path() {
        let (_temp_dir, manager) = setup_test_manager();
        assert!(manager.config_path().ends_with("config.toml"));
        assert!(manager.config_path().starts_with(manager.config_dir()));
    }
}

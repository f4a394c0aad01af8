//! # Configuration State
//!
//! Host settings: page size, starting theme, export location and whether
//! the sample dataset is loaded.
//!
//! ## Configuration Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                            │
//! │     GRIDLINE_ROWS_PER_PAGE, GRIDLINE_THEME, GRIDLINE_EXPORT_DIR         │
//! │                                                                         │
//! │  2. Config File                                                         │
//! │     $GRIDLINE_CONFIG, or gridline.toml in the platform config dir:      │
//! │     ~/.config/gridline/gridline.toml (Linux)                            │
//! │     ~/Library/Application Support/dev.gridline.gridline/ (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     10 rows per page, light theme, ./user_data.csv, sample data on      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! # gridline.toml
//! rows_per_page = 25
//! theme = "dark"
//! export_dir = "/home/me/exports"
//! export_file_name = "people.csv"
//! seed_sample_data = false
//! ```

use std::path::{Path, PathBuf};

use gridline_core::validation::validate_rows_per_page;
use gridline_core::{Theme, ValidationError, DEFAULT_ROWS_PER_PAGE};
use gridline_io::DEFAULT_EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable names.
pub const ENV_ROWS_PER_PAGE: &str = "GRIDLINE_ROWS_PER_PAGE";
pub const ENV_THEME: &str = "GRIDLINE_THEME";
pub const ENV_EXPORT_DIR: &str = "GRIDLINE_EXPORT_DIR";
pub const ENV_CONFIG_PATH: &str = "GRIDLINE_CONFIG";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "gridline.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Rows per page (1..=500)
    pub rows_per_page: usize,

    /// Theme the table starts in
    pub theme: Theme,

    /// Directory exports are written to
    pub export_dir: PathBuf,

    /// File name used for exports
    pub export_file_name: String,

    /// Load the 12-row sample dataset at startup
    pub seed_sample_data: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            theme: Theme::Light,
            export_dir: PathBuf::from("."),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            seed_sample_data: true,
        }
    }
}

/// On-disk shape of `gridline.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rows_per_page: Option<usize>,
    theme: Option<Theme>,
    export_dir: Option<PathBuf>,
    export_file_name: Option<String>,
    seed_sample_data: Option<bool>,
}

impl ConfigState {
    /// Loads configuration from the process environment, the config file
    /// and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Loads configuration using `lookup` in place of the process
    /// environment.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`GRIDLINE_CONFIG` or the platform default path)
    /// 3. Environment variables
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        let path = lookup(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .or_else(default_config_path);
        if let Some(path) = path {
            if path.exists() {
                info!(path = %path.display(), "Loading config from file");
                config.apply_file(&path)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(rows_per_page) = file.rows_per_page {
            self.rows_per_page = rows_per_page;
        }
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(dir) = file.export_dir {
            self.export_dir = dir;
        }
        if let Some(name) = file.export_file_name {
            self.export_file_name = name;
        }
        if let Some(seed) = file.seed_sample_data {
            self.seed_sample_data = seed;
        }
        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ROWS_PER_PAGE) {
            self.rows_per_page = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_ROWS_PER_PAGE.to_string(),
                value: value.clone(),
            })?;
            debug!(rows_per_page = self.rows_per_page, "Overriding page size from environment");
        }

        if let Some(value) = lookup(ENV_THEME) {
            self.theme = value.parse()?;
        }

        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            debug!(export_dir = %dir, "Overriding export directory from environment");
            self.export_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rows_per_page(self.rows_per_page)?;

        if self.export_file_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "export_file_name".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Full path exports are written to.
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }
}

/// Returns the default config file path.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "gridline", "gridline")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
        move |key| vars.get(key).cloned()
    }

    fn with_missing_file(mut vars: HashMap<&'static str, String>) -> HashMap<&'static str, String> {
        vars.entry(ENV_CONFIG_PATH)
            .or_insert_with(|| "/nonexistent/gridline/gridline.toml".to_string());
        vars
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::load_with(lookup_from(with_missing_file(HashMap::new()))).unwrap();

        assert_eq!(config, ConfigState::default());
        assert_eq!(config.rows_per_page, 10);
        assert_eq!(config.export_path(), PathBuf::from("./user_data.csv"));
    }

    #[test]
    fn test_file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "rows_per_page = 25\ntheme = \"dark\"\nexport_file_name = \"people.csv\"\nseed_sample_data = false\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert(ENV_CONFIG_PATH, path.display().to_string());
        vars.insert(ENV_ROWS_PER_PAGE, "5".to_string());

        let config = ConfigState::load_with(lookup_from(vars)).unwrap();

        assert_eq!(config.rows_per_page, 5);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.export_file_name, "people.csv");
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_rows_per_page_out_of_range() {
        let mut vars = HashMap::new();
        vars.insert(ENV_ROWS_PER_PAGE, "0".to_string());
        let result = ConfigState::load_with(lookup_from(with_missing_file(vars)));
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let mut vars = HashMap::new();
        vars.insert(ENV_ROWS_PER_PAGE, "501".to_string());
        let result = ConfigState::load_with(lookup_from(with_missing_file(vars)));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unparsable_env_value() {
        let mut vars = HashMap::new();
        vars.insert(ENV_ROWS_PER_PAGE, "ten".to_string());
        let result = ConfigState::load_with(lookup_from(with_missing_file(vars)));
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));

        let mut vars = HashMap::new();
        vars.insert(ENV_THEME, "purple".to_string());
        let result = ConfigState::load_with(lookup_from(with_missing_file(vars)));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_file_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "rows_per_pag = 25\n").unwrap();

        let mut vars = HashMap::new();
        vars.insert(ENV_CONFIG_PATH, path.display().to_string());

        let result = ConfigState::load_with(lookup_from(vars));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}

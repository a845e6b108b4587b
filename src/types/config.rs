//! Configuration for numflags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::errors::NumflagsError;
use crate::types::requests::OutputFormat;
use crate::NumflagsResult;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "numflags.toml";

/// Main configuration for numflags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Session cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Predicate selection.
    #[serde(default)]
    pub predicates: PredicatesConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format used when no flag is given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Emit diagnostics for invalid input and predicate failures.
    #[serde(default)]
    pub show_errors: bool,
}

/// Session cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of memoized results per session.
    ///
    /// Raised to the registry size when smaller, so a session never
    /// evicts and recomputes a result.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    64
}

/// Predicate selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredicatesConfig {
    /// Predicates skipped unless explicitly requested.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> NumflagsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads a file the user named explicitly; a missing or invalid file is an error.
    pub fn load_explicit<P: AsRef<Path>>(path: P) -> NumflagsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NumflagsError::config(format!("{} not found", path.display())));
        }
        Self::load(path).map_err(|e| NumflagsError::config(format!("{}: {}", path.display(), e)))
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> NumflagsResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            output: OutputConfig::default(),
            cache: CacheConfig::default(),
            predicates: PredicatesConfig::default(),
        }
    }

    /// Configuration file in the user's config directory, if one exists there.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("numflags").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Tries the current directory, then the user config directory, then defaults.
    pub fn load_or_default() -> Self {
        Self::load(CONFIG_FILE_NAME)
            .ok()
            .or_else(|| Self::user_config_path().and_then(|path| Self::load(path).ok()))
            .unwrap_or_else(Self::default_config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default_config();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.output.format, OutputFormat::Prose);
        assert!(!config.output.show_errors);
        assert!(config.cache.enabled);
        assert!(config.predicates.disabled.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "structured"

            [predicates]
            disabled = ["stack"]
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Structured);
        assert_eq!(config.predicates.disabled, vec!["stack".to_string()]);
        assert_eq!(config.cache.capacity, 64);
        assert_eq!(config.general.log_format, "text");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default_config();
        config.output.show_errors = true;
        config.cache.capacity = 16;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.output.show_errors);
        assert_eq!(loaded.cache.capacity, 16);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_load_explicit_reports_config_error() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.toml");
        let err = Config::load_explicit(&missing).unwrap_err();
        assert!(matches!(&err, NumflagsError::Config(msg) if msg.contains("missing.toml")));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[output\nformat = 1").unwrap();
        assert!(matches!(
            Config::load_explicit(&broken),
            Err(NumflagsError::Config(_))
        ));

        let valid = dir.path().join(CONFIG_FILE_NAME);
        Config::default_config().save(&valid).unwrap();
        assert!(Config::load_explicit(&valid).is_ok());
    }
}

//! Actionlog configuration.
//!
//! Loaded from `~/.actionlog/config.toml`. Every key is optional; a missing
//! file means all defaults.
//!
//! ```toml
//! min-level = "verbose"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::model::Level;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// How rendered log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per log action.
    #[default]
    Text,

    /// One JSON object per log action.
    Json,
}

/// Actionlog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Lines below this level are not rendered.
    pub min_level: Level,

    /// Output format when `--format` is not given.
    pub format: OutputFormat,
}

impl Config {
    /// Load config from `~/.actionlog/config.toml`, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.actionlog/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".actionlog").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.min_level, Level::Info);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn reads_kebab_case_keys() {
        let (_dir, path) = write_config("min-level = \"warn\"\nformat = \"json\"\n");
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.min_level, Level::Warn);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config("format = \"json\"\n");
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.min_level, Level::Info);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_level_is_a_parse_error() {
        let (_dir, path) = write_config("min-level = \"loud\"\n");
        let err = Config::load_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config at "));
    }

    #[test]
    fn directory_in_place_of_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

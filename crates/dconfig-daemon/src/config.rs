//! Daemon configuration file.
//!
//! Loaded from `~/.config/dconfig/daemon.toml` unless a path is given. A
//! missing file is not an error; every field has a default.
//!
//! ```toml
//! # Overrides DSG_DATA_DIRS for generic resources.
//! data_dir = "/data/dsg"
//! log_filter = "dconfig_daemon=debug,info"
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_FILTER};
use crate::standard_paths::{EnvStandardPaths, FixedStandardPaths, StandardPaths};

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the daemon and its tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    /// Data directory override. When unset, `DSG_DATA_DIRS` decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl DaemonConfig {
    /// `~/.config/dconfig/daemon.toml`, if there is a config dir at all.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Data directory source honoring the `data_dir` override.
    pub fn standard_paths(&self) -> Arc<dyn StandardPaths> {
        match &self.data_dir {
            Some(dir) => Arc::new(FixedStandardPaths::new(dir)),
            None => Arc::new(EnvStandardPaths),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaemonConfig::load(&dir.path().join("daemon.toml")).unwrap();
        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.toml");
        std::fs::write(&path, "data_dir = \"/data/dsg\"\nlog_filter = \"debug\"\n").unwrap();

        let config = DaemonConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/data/dsg")));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.standard_paths().configs_root(),
            PathBuf::from("/data/dsg/configs")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DaemonConfig = toml::from_str("data_dir = \"/x\"").unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.toml");
        std::fs::write(&path, "pool_size = [").unwrap();

        let err = DaemonConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<DaemonConfig>("data_directory = \"/x\"").is_err());
    }

    #[test]
    fn test_serialize_omits_unset_data_dir() {
        let text = toml::to_string(&DaemonConfig::default()).unwrap();
        assert_eq!(text.trim(), "log_filter = \"info\"");
    }
}

//! Where the daemon's data directory lives.
//!
//! Generic resources sit under `<data-dir>/configs`. The data directory is
//! environment-dependent, so the resolver asks a [`StandardPaths`] for it on
//! every call rather than caching it.

use std::path::{Path, PathBuf};

use crate::constants::{CONFIGS_DIR_NAME, DEFAULT_DSG_DATA_DIR, DSG_DATA_DIRS_ENV};

/// Source of the daemon's standard directories.
pub trait StandardPaths: Send + Sync {
    /// The DSG data directory.
    fn data_dir(&self) -> PathBuf;

    /// Root of generically located resources.
    fn configs_root(&self) -> PathBuf {
        self.data_dir().join(CONFIGS_DIR_NAME)
    }
}

/// Reads `DSG_DATA_DIRS` on each call, falling back to `/usr/share/dsg`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvStandardPaths;

impl StandardPaths for EnvStandardPaths {
    fn data_dir(&self) -> PathBuf {
        first_data_dir(std::env::var(DSG_DATA_DIRS_ENV).ok().as_deref())
    }
}

/// First non-empty entry of a colon-separated data dir list.
pub fn first_data_dir(dirs: Option<&str>) -> PathBuf {
    dirs.and_then(|v| v.split(':').find(|entry| !entry.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DSG_DATA_DIR))
}

/// A data directory fixed at construction (config override, tests).
#[derive(Clone, Debug)]
pub struct FixedStandardPaths {
    data_dir: PathBuf,
}

impl FixedStandardPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }
}

impl StandardPaths for FixedStandardPaths {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_data_dir() {
        assert_eq!(first_data_dir(None), PathBuf::from("/usr/share/dsg"));
        assert_eq!(first_data_dir(Some("")), PathBuf::from("/usr/share/dsg"));
        assert_eq!(first_data_dir(Some("/data/dsg")), PathBuf::from("/data/dsg"));
        assert_eq!(
            first_data_dir(Some(":/a/dsg:/b/dsg")),
            PathBuf::from("/a/dsg")
        );
    }

    #[test]
    fn test_configs_root() {
        let paths = FixedStandardPaths::new("/data/dsg");
        assert_eq!(paths.configs_root(), PathBuf::from("/data/dsg/configs"));
    }
}

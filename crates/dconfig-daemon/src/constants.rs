//! Daemon configuration constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

/// Directory under the user config dir holding dconfig files.
pub const CONFIG_DIR_NAME: &str = "dconfig";

/// Daemon configuration file name.
pub const CONFIG_FILE_NAME: &str = "daemon.toml";

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable listing DSG data directories, colon-separated.
pub const DSG_DATA_DIRS_ENV: &str = "DSG_DATA_DIRS";

/// Data directory used when `DSG_DATA_DIRS` is unset or empty.
pub const DEFAULT_DSG_DATA_DIR: &str = "/usr/share/dsg";

/// Subdirectory of the data directory holding generic resources.
pub const CONFIGS_DIR_NAME: &str = "configs";

/// Mount point of the Linux process table.
pub const PROC_ROOT: &str = "/proc";

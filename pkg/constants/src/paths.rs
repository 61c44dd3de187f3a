//! Filesystem path constants.

/// Per-user directory (relative to `$HOME`) holding config and credentials.
pub const CONFIG_DIR: &str = ".lms";

/// Filename of the YAML config file inside `CONFIG_DIR`.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Filename of the persisted credential map inside `CONFIG_DIR`.
pub const CREDENTIALS_FILENAME: &str = "credentials.json";

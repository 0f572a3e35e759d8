//! Bundled assets and fixed names used by the bootstrap.

/// Fixed filename of the override configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable naming the override config directory. A non-empty
/// value is used verbatim; otherwise the directory falls back to a named
/// subdirectory of the system temp path.
pub const CONFIG_DIR_ENV: &str = "STRATUM_CONFIG_DIR";

/// Default override file content, copied verbatim to disk on first run.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/config.toml");

/// Master defaults, parsed fresh on every load and never written to disk.
pub const MASTER_CONFIG: &str = include_str!("../assets/master-config.toml");

/// Origin label for parse errors in the embedded master document.
pub const MASTER_ORIGIN: &str = "embedded master-config.toml";

//! Override config directory resolution.

use crate::error::ConfigError;
use crate::resources;
use std::path::PathBuf;
use tracing::info;

/// Resolve the override config directory.
///
/// A non-empty `STRATUM_CONFIG_DIR` is used verbatim. Otherwise the directory
/// is `<system temp path>/<default_dir_name>`. The directory is created
/// (recursively) if it does not exist.
pub fn resolve_config_dir(default_dir_name: &str) -> Result<PathBuf, ConfigError> {
    if default_dir_name.is_empty() || default_dir_name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidDirectoryName(
            default_dir_name.to_string(),
        ));
    }

    let directory = match std::env::var(resources::CONFIG_DIR_ENV) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => {
            let fallback = std::env::temp_dir().join(default_dir_name);
            info!(
                directory = %fallback.display(),
                "Config directory not specified, using default"
            );
            fallback
        }
    };

    if !directory.exists() {
        info!(
            directory = %directory.display(),
            "Config directory did not already exist. Creating..."
        );
        std::fs::create_dir_all(&directory).map_err(|source| ConfigError::CreateDirectory {
            path: directory.clone(),
            source,
        })?;
    }

    Ok(directory)
}

//! One-time extraction of the bundled default override file.

use crate::error::ConfigError;
use crate::resources;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ensure the override file exists inside `directory`.
///
/// An existing file is reused untouched. Otherwise the bundled default is
/// written verbatim. Returns the file path and whether it was just created.
pub fn ensure_override_file(directory: &Path) -> Result<(PathBuf, bool), ConfigError> {
    let file = directory.join(resources::CONFIG_FILE_NAME);
    if file.exists() {
        return Ok((file, false));
    }

    info!(
        file = %file.display(),
        "Configuration not found, extracting bundled default"
    );
    std::fs::write(&file, resources::DEFAULT_CONFIG).map_err(|source| ConfigError::Bootstrap {
        path: file.clone(),
        source,
    })?;
    Ok((file, true))
}

//! Install target for the packaged extension.

use std::path::{Path, PathBuf};

use rmx_fs::{NormalizedPath, io};

use crate::descriptor::ExtensionDescriptor;
use crate::error::{Error, Result};

/// Default install location, relative to the user's home directory.
pub const DEFAULT_EXTENSIONS_DIR: &str = ".RapidMiner/extensions";

impl ExtensionDescriptor {
    /// Directory the packaged extension is installed into.
    pub fn install_target(&self) -> Result<PathBuf> {
        install_target(self.extension_folder.as_deref(), dirs::home_dir())
    }
}

/// Validate the install override, or fall back to the default under `home`.
///
/// An override must be an absolute path to an existing directory and is
/// returned canonicalized.
pub fn install_target(folder: Option<&Path>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(folder) = folder {
        return validate_override(folder);
    }

    let home = home.ok_or_else(|| Error::InvalidInstallPath {
        path: PathBuf::from("~").join(DEFAULT_EXTENSIONS_DIR),
        reason: "the home directory could not be determined".to_string(),
    })?;
    let target = home.join(DEFAULT_EXTENSIONS_DIR);
    tracing::debug!("Using default install target {}", target.display());
    Ok(target)
}

fn validate_override(folder: &Path) -> Result<PathBuf> {
    let invalid = |reason: &str| Error::InvalidInstallPath {
        path: folder.to_path_buf(),
        reason: reason.to_string(),
    };

    if !folder.is_absolute() {
        return Err(invalid("the path is not absolute"));
    }
    if !folder.exists() {
        return Err(invalid("the path does not exist"));
    }
    if !folder.is_dir() {
        return Err(invalid("the path is not a directory"));
    }

    let canonical = io::canonicalize(&NormalizedPath::new(folder))?;
    tracing::debug!("Using configured install target {}", canonical);
    Ok(canonical.to_native())
}

//! The resolved extension descriptor.

use std::path::PathBuf;

use crate::config::ExtensionConfig;
use crate::error::{Error, Result};

/// Group id used when the configuration does not set one.
pub const DEFAULT_GROUP_ID: &str = "com.rapidminer.extension";

/// Build wrapper version used when the configuration does not set one.
pub const DEFAULT_WRAPPER_VERSION: &str = "2.13";

/// Identity of an extension, derived once from its configuration.
///
/// Immutable after construction; every later stage borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub name: String,
    pub namespace: String,
    pub group_id: String,
    pub vendor: Option<String>,
    pub homepage: Option<String>,
    pub extension_folder: Option<PathBuf>,
    pub wrapper_version: String,
}

impl ExtensionDescriptor {
    /// Derive the descriptor from user configuration.
    ///
    /// Only the name is required here since everything else is derived from
    /// it. The remaining mandatory fields are enforced by the manifest check.
    pub fn from_config(config: &ExtensionConfig) -> Result<Self> {
        let name = non_blank(config.name.as_deref())
            .ok_or(Error::MissingMandatoryField { field: "name" })?
            .to_string();

        let namespace = match non_blank(config.namespace.as_deref()) {
            Some(namespace) => namespace.to_string(),
            None => derive_namespace(&name),
        };

        Ok(Self {
            namespace,
            group_id: config
                .group_id
                .clone()
                .unwrap_or_else(|| DEFAULT_GROUP_ID.to_string()),
            vendor: non_blank(config.vendor.as_deref()).map(String::from),
            homepage: non_blank(config.homepage.as_deref()).map(String::from),
            extension_folder: config.extension_folder.clone(),
            wrapper_version: non_blank(config.wrapper_version.as_deref())
                .unwrap_or(DEFAULT_WRAPPER_VERSION)
                .to_string(),
            name,
        })
    }

    /// The name as it appears in conventional file names: whitespace removed.
    ///
    /// "Web Mining" becomes "WebMining".
    pub fn file_name_stem(&self) -> String {
        self.name.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Derive a namespace slug from an extension name.
///
/// Each whitespace character becomes an underscore and the result is
/// lower-cased: "Web Mining" becomes "web_mining".
pub fn derive_namespace(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Project configuration from `extension.toml`.
//!
//! This is the user-supplied half of the descriptor: everything here is
//! optional at parse time. Mandatory fields are enforced later, when the
//! descriptor is derived and the manifest is checked.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locator::ResourceKind;

/// Complete project configuration loaded from `extension.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ProjectConfig {
    /// Build version of the component, when not supplied by the build glue.
    #[serde(default)]
    pub version: Option<String>,
    /// Extension settings. Absent for projects that are not extensions.
    #[serde(default)]
    pub extension: Option<ExtensionConfig>,
}

/// The `[extension]` table.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Human readable extension name (e.g. "Web Mining").
    #[serde(default)]
    pub name: Option<String>,
    /// Namespace slug. Derived from the name when unset.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    /// Overrides the folder the extension is installed into.
    #[serde(default)]
    pub extension_folder: Option<PathBuf>,
    /// Version of the build wrapper used by the project.
    #[serde(default)]
    pub wrapper_version: Option<String>,
    #[serde(default)]
    pub resources: ResourcePaths,
    #[serde(default)]
    pub dependencies: DependencySpec,
}

/// Explicit resource locations, relative to `src/main/resources`.
///
/// `init_class` is a fully qualified Java class name instead of a path.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResourcePaths {
    #[serde(default)]
    pub init_class: Option<String>,
    #[serde(default)]
    pub operators: Option<String>,
    #[serde(default)]
    pub ioobjects: Option<String>,
    #[serde(default)]
    pub parse_rules: Option<String>,
    #[serde(default)]
    pub groups: Option<String>,
    #[serde(default)]
    pub errors: Option<String>,
    #[serde(default)]
    pub user_errors: Option<String>,
    #[serde(default)]
    pub gui: Option<String>,
    #[serde(default)]
    pub settings: Option<String>,
    #[serde(default)]
    pub settings_structure: Option<String>,
}

impl ResourcePaths {
    /// The configured value for `kind`. Blank values count as unset.
    pub fn get(&self, kind: ResourceKind) -> Option<&str> {
        let value = match kind {
            ResourceKind::InitClass => &self.init_class,
            ResourceKind::Operators => &self.operators,
            ResourceKind::IoObjects => &self.ioobjects,
            ResourceKind::ParseRules => &self.parse_rules,
            ResourceKind::Groups => &self.groups,
            ResourceKind::Errors => &self.errors,
            ResourceKind::UserErrors => &self.user_errors,
            ResourceKind::Gui => &self.gui,
            ResourceKind::Settings => &self.settings,
            ResourceKind::SettingsStructure => &self.settings_structure,
        };
        non_blank(value)
    }
}

/// The `[extension.dependencies]` table.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    /// Minimum platform version.
    #[serde(default)]
    pub platform_version: Option<String>,
    /// Sibling project whose version is the minimum platform version.
    #[serde(default)]
    pub platform_project: Option<String>,
    /// Other extensions this one depends on, in declaration order.
    #[serde(default)]
    pub extensions: Vec<ExtensionDependencyRef>,
}

impl DependencySpec {
    pub fn platform_version(&self) -> Option<&str> {
        non_blank(&self.platform_version)
    }

    pub fn platform_project(&self) -> Option<&str> {
        non_blank(&self.platform_project)
    }
}

/// One declared dependency on another extension.
///
/// Either `namespace` + `version`, or `project` naming a sibling extension
/// project. Mixing both is rejected during dependency resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionDependencyRef {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

impl ExtensionDependencyRef {
    /// Dependency on a published extension.
    pub fn published(namespace: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            version: Some(version.into()),
            project: None,
        }
    }

    /// Dependency on a sibling extension project.
    pub fn sibling(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            ..Self::default()
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        non_blank(&self.namespace)
    }

    pub fn version(&self) -> Option<&str> {
        non_blank(&self.version)
    }

    pub fn project(&self) -> Option<&str> {
        non_blank(&self.project)
    }
}

impl std::fmt::Display for ExtensionDependencyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = [
            ("namespace", self.namespace()),
            ("version", self.version()),
            ("project", self.project()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key} = \"{v}\"")))
        .collect();

        if fields.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{ {} }}", fields.join(", "))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ProjectConfig {
    /// Parse a project configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a project configuration from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let path = rmx_fs::NormalizedPath::new(path);
        Ok(rmx_fs::ConfigStore::new().load(&path)?)
    }

    /// Read `extension.toml` from a project directory.
    pub fn from_project_dir(dir: &Path) -> Result<Self> {
        Self::from_path(&dir.join(crate::CONFIG_FILENAME))
    }
}

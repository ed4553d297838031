//! Sibling projects referenced by dependency declarations.
//!
//! A dependency may point at another project in the same build instead of a
//! published version. Such a project must expose a fully configured extension
//! descriptor; [`ExtensionProject::extension`] is the capability probe.

use std::collections::HashMap;

use rmx_fs::NormalizedPath;

use crate::config::ProjectConfig;
use crate::descriptor::ExtensionDescriptor;
use crate::error::Result;

/// A project that may or may not be an extension.
pub trait ExtensionProject {
    /// Reference name of the project.
    fn name(&self) -> &str;

    /// The project's extension descriptor, if it is an extension project.
    fn extension(&self) -> Option<&ExtensionDescriptor>;

    /// Build version of the project, if known.
    fn version(&self) -> Option<&str>;
}

impl<T: ExtensionProject + ?Sized> ExtensionProject for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extension(&self) -> Option<&ExtensionDescriptor> {
        (**self).extension()
    }

    fn version(&self) -> Option<&str> {
        (**self).version()
    }
}

/// Resolves project references to projects.
pub trait ProjectLookup {
    /// Look up `reference`. `Ok(None)` means no such project exists.
    fn project(&self, reference: &str) -> Result<Option<Box<dyn ExtensionProject + '_>>>;
}

/// A sibling project known to the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingProject {
    pub name: String,
    pub version: Option<String>,
    pub extension: Option<ExtensionDescriptor>,
}

impl SiblingProject {
    /// A project that is not an extension.
    pub fn plain(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(String::from),
            extension: None,
        }
    }

    /// An extension project.
    pub fn extension(
        name: impl Into<String>,
        version: Option<&str>,
        descriptor: ExtensionDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.map(String::from),
            extension: Some(descriptor),
        }
    }

    /// Build from a parsed `extension.toml`.
    ///
    /// An `[extension]` table that does not yield a descriptor leaves the
    /// project without one, the same as a missing table.
    pub fn from_config(name: impl Into<String>, config: &ProjectConfig) -> Self {
        let name = name.into();
        let extension = config.extension.as_ref().and_then(|extension| {
            ExtensionDescriptor::from_config(extension)
                .inspect_err(|e| {
                    tracing::debug!("Project '{}' has an incomplete extension table: {}", name, e)
                })
                .ok()
        });
        Self {
            name,
            version: config.version.clone().filter(|v| !v.trim().is_empty()),
            extension,
        }
    }
}

impl ExtensionProject for SiblingProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn extension(&self) -> Option<&ExtensionDescriptor> {
        self.extension.as_ref()
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// In-memory project lookup.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: HashMap<String, SiblingProject>,
}

impl ProjectRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project under its name, replacing any previous entry.
    pub fn register(&mut self, project: SiblingProject) {
        self.projects.insert(project.name.clone(), project);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectLookup for ProjectRegistry {
    fn project(&self, reference: &str) -> Result<Option<Box<dyn ExtensionProject + '_>>> {
        Ok(self
            .projects
            .get(reference)
            .map(|project| Box::new(project) as Box<dyn ExtensionProject + '_>))
    }
}

/// Project lookup over sibling directories of a multi-project build.
///
/// The reference `web-mining-base` resolves to
/// `<workspace>/web-mining-base/extension.toml`, read on demand.
#[derive(Debug, Clone)]
pub struct DirectoryProjects {
    workspace: NormalizedPath,
}

impl DirectoryProjects {
    pub fn new(workspace: impl Into<NormalizedPath>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

impl ProjectLookup for DirectoryProjects {
    fn project(&self, reference: &str) -> Result<Option<Box<dyn ExtensionProject + '_>>> {
        let config_path = self
            .workspace
            .join(reference)
            .join(crate::CONFIG_FILENAME);
        if !config_path.is_file() {
            tracing::debug!("No project configuration at {}", config_path);
            return Ok(None);
        }
        let config = ProjectConfig::from_path(&config_path.to_native())?;
        Ok(Some(Box::new(SiblingProject::from_config(reference, &config))))
    }
}

//! Dependency descriptor resolution.
//!
//! Turns the declared platform version and extension dependencies into
//! concrete `(namespace, version)` pairs. A declaration names either an
//! explicit version or a sibling project, never both and never neither.
//!
//! # Example
//!
//! ```
//! use rmx_extension::config::{DependencySpec, ExtensionDependencyRef};
//! use rmx_extension::dependency::DependencyResolver;
//! use rmx_extension::project::ProjectRegistry;
//!
//! let spec = DependencySpec {
//!     extensions: vec![
//!         ExtensionDependencyRef::published("text", "5.3.3-SNAPSHOT"),
//!         ExtensionDependencyRef::published("core", "1.0.0"),
//!     ],
//!     ..DependencySpec::default()
//! };
//!
//! let projects = ProjectRegistry::new();
//! let resolved = DependencyResolver::new(&projects).resolve(&spec).unwrap();
//! assert_eq!(
//!     resolved.plugin_dependencies(),
//!     "rmx_text[5.3.3-SNAPSHOT]; rmx_core[1.0.0]"
//! );
//! ```

use crate::config::{DependencySpec, ExtensionDependencyRef};
use crate::error::{Error, Result};
use crate::project::{ExtensionProject, ProjectLookup};

/// Platform version used when neither a version nor a project is declared.
pub const DEFAULT_PLATFORM_VERSION: &str = "7.0.0";

/// Prefix turning a namespace into an extension id.
pub const EXTENSION_ID_PREFIX: &str = "rmx_";

/// Separator between entries of the plugin dependency attribute.
const DEPENDENCY_SEPARATOR: &str = "; ";

/// The extension id for `namespace` (e.g. `rmx_text`).
pub fn extension_id(namespace: &str) -> String {
    format!("{EXTENSION_ID_PREFIX}{namespace}")
}

/// A dependency resolved to a concrete extension and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub namespace: String,
    pub version: String,
}

impl std::fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", extension_id(&self.namespace), self.version)
    }
}

/// All dependencies of an extension, resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependencies {
    /// Minimum platform version.
    pub platform_version: String,
    /// Extension dependencies in declaration order.
    pub extensions: Vec<ResolvedDependency>,
}

impl ResolvedDependencies {
    /// The plugin dependency attribute: entries joined by `"; "`.
    ///
    /// Empty when there are no extension dependencies.
    pub fn plugin_dependencies(&self) -> String {
        self.extensions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(DEPENDENCY_SEPARATOR)
    }
}

/// Resolves a [`DependencySpec`] against the projects of the build.
pub struct DependencyResolver<'a> {
    projects: &'a dyn ProjectLookup,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(projects: &'a dyn ProjectLookup) -> Self {
        Self { projects }
    }

    /// Resolve the platform version and every extension dependency.
    ///
    /// The first invalid declaration aborts resolution.
    pub fn resolve(&self, spec: &DependencySpec) -> Result<ResolvedDependencies> {
        let platform_version = self.resolve_platform_version(spec)?;
        let extensions = spec
            .extensions
            .iter()
            .enumerate()
            .map(|(index, entry)| self.resolve_entry(index, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedDependencies {
            platform_version,
            extensions,
        })
    }

    /// Resolve the minimum platform version.
    pub fn resolve_platform_version(&self, spec: &DependencySpec) -> Result<String> {
        match (spec.platform_version(), spec.platform_project()) {
            (Some(_), Some(_)) => Err(Error::ConflictingDependencySpec {
                entry: "platform dependency".to_string(),
            }),
            (Some(version), None) => Ok(version.to_string()),
            (None, Some(reference)) => {
                let project = self.lookup(reference)?;
                let version = project_version(&*project)?;
                tracing::debug!("Platform version {} taken from project '{}'", version, reference);
                Ok(version)
            }
            (None, None) => Ok(DEFAULT_PLATFORM_VERSION.to_string()),
        }
    }

    /// Resolve one extension dependency; `index` is its declaration position.
    pub fn resolve_entry(
        &self,
        index: usize,
        entry: &ExtensionDependencyRef,
    ) -> Result<ResolvedDependency> {
        let label = || format!("extension dependency #{} {}", index + 1, entry);

        let explicit = entry.namespace().is_some() || entry.version().is_some();
        match (explicit, entry.project()) {
            (true, Some(_)) => Err(Error::ConflictingDependencySpec { entry: label() }),
            (false, None) => Err(Error::MissingDependencySpec {
                entry: label(),
                reason: "set either a version or a project".to_string(),
            }),
            (true, None) => {
                let namespace = entry.namespace().ok_or_else(|| Error::MissingDependencySpec {
                    entry: label(),
                    reason: "a namespace is required alongside the version".to_string(),
                })?;
                let version = entry.version().ok_or_else(|| Error::MissingDependencySpec {
                    entry: label(),
                    reason: "a version is required alongside the namespace".to_string(),
                })?;
                Ok(ResolvedDependency {
                    namespace: namespace.to_string(),
                    version: version.to_string(),
                })
            }
            (false, Some(reference)) => {
                let project = self.lookup(reference)?;
                let descriptor =
                    project
                        .extension()
                        .ok_or_else(|| Error::NotAnExtensionProject {
                            project: reference.to_string(),
                        })?;
                Ok(ResolvedDependency {
                    namespace: descriptor.namespace.clone(),
                    version: project_version(&*project)?,
                })
            }
        }
    }

    fn lookup(&self, reference: &str) -> Result<Box<dyn ExtensionProject + 'a>> {
        self.projects
            .project(reference)?
            .ok_or_else(|| Error::UnknownProject {
                project: reference.to_string(),
            })
    }
}

fn project_version(project: &dyn ExtensionProject) -> Result<String> {
    project
        .version()
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
        .ok_or_else(|| Error::UnresolvedProjectVersion {
            project: project.name().to_string(),
        })
}

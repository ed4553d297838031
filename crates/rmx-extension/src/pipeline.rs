//! End-to-end descriptor resolution for one extension project.

use std::path::Path;

use rmx_fs::{NormalizedPath, ProjectLayout, io};
use serde::Serialize;

use crate::config::{ExtensionConfig, ProjectConfig};
use crate::dependency::{DependencyResolver, ResolvedDependencies};
use crate::descriptor::ExtensionDescriptor;
use crate::error::{Error, Result};
use crate::locator::{ResolvedResources, ResourceLocator, ResourceSet};
use crate::manifest::{ManifestAssembler, ManifestInputs, ResolvedManifest};
use crate::project::{DirectoryProjects, ProjectLookup};

/// Everything resolved for one build invocation.
#[derive(Debug, Clone)]
pub struct ResolvedDescriptor {
    pub descriptor: ExtensionDescriptor,
    pub version: String,
    pub resources: ResolvedResources,
    pub dependencies: ResolvedDependencies,
    pub manifest: ResolvedManifest,
}

/// Output shape of `rmx manifest --json`.
#[derive(Debug, Serialize)]
pub struct ManifestReport<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub version: &'a str,
    pub manifest: &'a ResolvedManifest,
}

impl ResolvedDescriptor {
    pub fn report(&self) -> ManifestReport<'_> {
        ManifestReport {
            name: &self.descriptor.name,
            namespace: &self.descriptor.namespace,
            version: &self.version,
            manifest: &self.manifest,
        }
    }
}

/// Runs descriptor derivation, resource and dependency resolution, then
/// manifest assembly.
pub struct DescriptorResolver<'a> {
    layout: &'a ProjectLayout,
    projects: &'a dyn ProjectLookup,
}

impl<'a> DescriptorResolver<'a> {
    pub fn new(layout: &'a ProjectLayout, projects: &'a dyn ProjectLookup) -> Self {
        Self { layout, projects }
    }

    /// Resolve `config` for build version `version`.
    ///
    /// Reads the project tree but never writes to it, so repeated runs over
    /// the same inputs yield identical results.
    pub fn resolve(&self, config: &ExtensionConfig, version: &str) -> Result<ResolvedDescriptor> {
        let descriptor = ExtensionDescriptor::from_config(config)?;
        tracing::debug!(
            "Resolving extension '{}' (namespace {}) at {}",
            descriptor.name,
            descriptor.namespace,
            self.layout.root
        );

        let locator = ResourceLocator::new(self.layout, &descriptor);
        let resources = ResourceSet::from_paths(&config.resources).resolve(&locator)?;

        let dependencies = DependencyResolver::new(self.projects).resolve(&config.dependencies)?;

        let manifest = ManifestAssembler::new(ManifestInputs {
            layout: self.layout,
            descriptor: &descriptor,
            version,
            resources: &resources,
            dependencies: &dependencies,
        })
        .assemble()?;

        tracing::info!(
            "Resolved extension '{}' version {} with {} manifest attributes",
            descriptor.name,
            version,
            manifest.len()
        );

        Ok(ResolvedDescriptor {
            descriptor,
            version: version.to_string(),
            resources,
            dependencies,
            manifest,
        })
    }
}

/// Resolve the extension project at `root`.
///
/// Reads `extension.toml` from `root`. The build version is `version` when
/// given, else the configured one. Sibling project references resolve to
/// directories next to `root`.
pub fn resolve_project(root: &Path, version: Option<&str>) -> Result<ResolvedDescriptor> {
    let root = io::canonicalize(&NormalizedPath::new(root))?;
    let layout = ProjectLayout::open(root)?;
    let config = ProjectConfig::from_project_dir(&layout.root.to_native())?;
    let extension = config
        .extension
        .as_ref()
        .ok_or_else(|| Error::NotAnExtensionProject {
            project: layout.root.to_string(),
        })?;

    let version = version
        .or(config.version.as_deref())
        .unwrap_or_default();

    let workspace = layout
        .root
        .parent()
        .unwrap_or_else(|| layout.root.clone());
    let projects = DirectoryProjects::new(workspace);

    DescriptorResolver::new(&layout, &projects).resolve(extension, version)
}

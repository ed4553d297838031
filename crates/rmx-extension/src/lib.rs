//! Extension descriptor resolution for RapidMiner extension builds.
//!
//! This crate turns a project's `extension.toml` and source tree into the
//! values a packaging step needs: resolved resource locations, the plugin
//! dependency string, the manifest attributes and the set of transitive
//! dependencies to exclude from the packaged archive.

pub mod config;
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod exclusion;
pub mod install;
pub mod locator;
pub mod manifest;
pub mod pipeline;
pub mod project;

/// The canonical filename for extension project configuration.
///
/// Every extension project carries a file with this name at its root, next
/// to `src/`.
pub const CONFIG_FILENAME: &str = "extension.toml";

pub use config::{
    DependencySpec, ExtensionConfig, ExtensionDependencyRef, ProjectConfig, ResourcePaths,
};
pub use dependency::{DependencyResolver, ResolvedDependencies, ResolvedDependency};
pub use descriptor::ExtensionDescriptor;
pub use error::{Error, Result};
pub use exclusion::{
    Coordinate, DependencyNode, ExclusionSet, ResolvedGraph, ResolvedModule, compute_exclusions,
};
pub use install::install_target;
pub use locator::{Resolution, ResolvedResources, ResourceKind, ResourceLocator, ResourceSet};
pub use manifest::{DocbundleError, ManifestAssembler, ManifestInputs, ResolvedManifest};
pub use pipeline::{DescriptorResolver, ResolvedDescriptor, resolve_project};
pub use project::{
    DirectoryProjects, ExtensionProject, ProjectLookup, ProjectRegistry, SiblingProject,
};

use std::path::PathBuf;

use crate::locator::ResourceKind;

/// Errors that can occur while resolving an extension descriptor.
///
/// Every variant is fatal to the current build invocation. Optional resources
/// that cannot be found are not errors; they resolve to
/// [`Resolution::NotFound`](crate::locator::Resolution::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory resource was neither configured, at its default path, nor
    /// found by scanning.
    #[error(
        "mandatory resource '{kind}' not found: default path {default_path} does not exist and no candidate was found under {root}"
    )]
    MissingMandatoryResource {
        kind: ResourceKind,
        default_path: PathBuf,
        root: PathBuf,
    },

    /// A resource path was configured explicitly but does not exist.
    #[error("resource '{kind}' configured as {path} does not exist")]
    MissingUserResource { kind: ResourceKind, path: PathBuf },

    /// A configured resource path cannot be used as given.
    #[error("resource '{kind}' configured as {path} is invalid: {reason}")]
    InvalidUserResource {
        kind: ResourceKind,
        path: PathBuf,
        reason: String,
    },

    /// A resource exists but is internally inconsistent.
    #[error("resource '{kind}' at {path} is malformed: {reason}")]
    MalformedExistingResource {
        kind: ResourceKind,
        path: PathBuf,
        reason: String,
    },

    /// An assembled manifest value cannot be written as a manifest line.
    #[error("manifest attribute '{key}' contains a control character")]
    InvalidManifestValue { key: String },

    /// A mandatory descriptor field is missing or empty.
    #[error("mandatory field '{field}' is not set")]
    MissingMandatoryField { field: &'static str },

    /// A dependency declares both an explicit version and a sibling project.
    #[error("{entry} declares both an explicit version and a project reference")]
    ConflictingDependencySpec { entry: String },

    /// A dependency declares neither an explicit version nor a sibling project.
    #[error("{entry} is incomplete: {reason}")]
    MissingDependencySpec { entry: String, reason: String },

    /// A referenced sibling project does not carry an extension descriptor.
    #[error("project '{project}' is not an extension project")]
    NotAnExtensionProject { project: String },

    /// A referenced sibling project does not exist.
    #[error("unknown project '{project}'")]
    UnknownProject { project: String },

    /// A referenced sibling project has no build version.
    #[error("project '{project}' has no version")]
    UnresolvedProjectVersion { project: String },

    /// The extension install folder cannot be used.
    #[error("invalid extension install folder {path}: {reason}")]
    InvalidInstallPath { path: PathBuf, reason: String },

    /// Failed to parse the project configuration TOML.
    #[error("failed to parse extension configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Project configuration file not found at the expected path.
    #[error("extension configuration not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Filesystem error while reading project files.
    #[error(transparent)]
    Fs(#[from] rmx_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

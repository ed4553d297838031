//! Extension project layout
//!
//! Every extension project follows the same Maven-style convention: Java
//! sources under `src/main/java/`, resources under `src/main/resources/`.

use crate::{Error, NormalizedPath, ProjectPath, Result};

/// Resolved locations of an extension project on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// The project root directory.
    pub root: NormalizedPath,
}

impl ProjectLayout {
    /// Create a layout rooted at `root` without touching the filesystem.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// Create a layout rooted at an existing directory.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_native(),
            });
        }
        Ok(Self { root })
    }

    /// `<root>/src/main/java`
    pub fn java_root(&self) -> NormalizedPath {
        self.root.join(ProjectPath::JavaSources.as_str())
    }

    /// `<root>/src/main/resources`
    pub fn resources_root(&self) -> NormalizedPath {
        self.root.join(ProjectPath::Resources.as_str())
    }

    /// Resolve a path given relative to the resource root.
    pub fn resource(&self, relative: &str) -> NormalizedPath {
        self.resources_root().join(relative)
    }
}

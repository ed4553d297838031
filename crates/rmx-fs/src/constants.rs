//! Constants and enums for extension project filesystem paths.

use std::path::Path;

/// Conventional locations inside an extension project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The Java source root, relative to the project root
    JavaSources,
    /// The resource root, relative to the project root
    Resources,
    /// The package holding descriptor files, relative to the resource root
    ResourcePackage,
    /// The package holding the initialization class, relative to the Java source root
    InitPackage,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaSources => "src/main/java",
            Self::Resources => "src/main/resources",
            Self::ResourcePackage => "com/rapidminer/resources",
            Self::InitPackage => "com/rapidminer",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

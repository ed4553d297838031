//! Heuristic resource discovery.
//!
//! Each resource kind is resolved in three steps, stopping at the first hit:
//!
//! 1. an explicitly configured path, which must exist;
//! 2. the conventional default path derived from the extension name;
//! 3. a scan of the source tree for a file whose name identifies the kind.
//!
//! When all three come up empty, mandatory kinds fail and optional kinds
//! resolve to [`Resolution::NotFound`]. Resolved file paths are relative to
//! `src/main/resources` with `/` separators; the initialization class
//! resolves to a fully qualified class name.

use std::collections::BTreeMap;

use rmx_fs::{FileScan, NormalizedPath, ProjectLayout, ProjectPath, ScanFilter};

use crate::config::ResourcePaths;
use crate::descriptor::ExtensionDescriptor;
use crate::error::{Error, Result};

/// The logical resources an extension can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    InitClass,
    Operators,
    IoObjects,
    ParseRules,
    Groups,
    Errors,
    UserErrors,
    Gui,
    Settings,
    SettingsStructure,
}

impl ResourceKind {
    /// Every kind, in manifest order.
    pub const ALL: [ResourceKind; 10] = [
        Self::InitClass,
        Self::Operators,
        Self::IoObjects,
        Self::ParseRules,
        Self::Groups,
        Self::Errors,
        Self::UserErrors,
        Self::Gui,
        Self::Settings,
        Self::SettingsStructure,
    ];

    /// Key under `[extension.resources]`.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::InitClass => "init_class",
            Self::Operators => "operators",
            Self::IoObjects => "ioobjects",
            Self::ParseRules => "parse_rules",
            Self::Groups => "groups",
            Self::Errors => "errors",
            Self::UserErrors => "user_errors",
            Self::Gui => "gui",
            Self::Settings => "settings",
            Self::SettingsStructure => "settings_structure",
        }
    }

    /// Manifest attribute carrying the resolved value.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Self::InitClass => "Initialization-Class",
            Self::Operators => "Operator-Descriptor",
            Self::IoObjects => "IOObject-Descriptor",
            Self::ParseRules => "ParseRule-Descriptor",
            Self::Groups => "Group-Descriptor",
            Self::Errors => "Error-Descriptor",
            Self::UserErrors => "UserError-Descriptor",
            Self::Gui => "GUI-Descriptor",
            Self::Settings => "Settings-Descriptor",
            Self::SettingsStructure => "SettingsStructure-Descriptor",
        }
    }

    /// Substring identifying the kind in a file name. Also the prefix of the
    /// conventional file name.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::InitClass => "PluginInit",
            Self::Operators => "Operators",
            Self::IoObjects => "ioobjects",
            Self::ParseRules => "parserules",
            Self::Groups => "groups",
            Self::Errors => "Errors",
            Self::UserErrors => "UserErrorMessages",
            Self::Gui => "GUI",
            Self::Settings => "Settings",
            Self::SettingsStructure => "SettingsStructure",
        }
    }

    /// File extension of the kind, without the dot.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::InitClass => "java",
            Self::Operators | Self::IoObjects | Self::ParseRules | Self::SettingsStructure => {
                "xml"
            }
            Self::Groups | Self::Errors | Self::UserErrors | Self::Gui | Self::Settings => {
                "properties"
            }
        }
    }

    /// Subdirectory of the resource package holding the default file.
    pub fn subdirectory(&self) -> Option<&'static str> {
        match self {
            Self::Errors | Self::UserErrors | Self::Gui | Self::Settings => Some("i18n"),
            _ => None,
        }
    }

    /// File name substring that disqualifies a scan candidate.
    ///
    /// Needed where another file's name contains this kind's identifier.
    pub fn exclusion(&self) -> Option<&'static str> {
        match self {
            Self::Operators => Some("OperatorsDoc"),
            Self::Settings => Some("SettingsStructure"),
            _ => None,
        }
    }

    /// Whether the build fails when the resource cannot be found.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::InitClass | Self::Operators)
    }

    /// Conventional file name for an extension whose name stem is `stem`.
    pub fn default_file_name(&self, stem: &str) -> String {
        format!("{}{}.{}", self.identifier(), stem, self.file_extension())
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Outcome of a successful lookup.
///
/// Lookup failures travel separately as [`Error`], so `Result<Resolution>`
/// carries all three states: resolved, absent, failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path relative to the resource root, or a fully qualified class name.
    Resolved(String),
    /// The feature is absent. Not an error.
    NotFound,
}

impl Resolution {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// The manifest value: the resolved value or an empty string.
    pub fn manifest_value(&self) -> &str {
        self.value().unwrap_or("")
    }
}

/// Locates resources inside one extension project.
#[derive(Debug, Clone)]
pub struct ResourceLocator<'a> {
    layout: &'a ProjectLayout,
    stem: String,
}

impl<'a> ResourceLocator<'a> {
    pub fn new(layout: &'a ProjectLayout, descriptor: &ExtensionDescriptor) -> Self {
        Self {
            layout,
            stem: descriptor.file_name_stem(),
        }
    }

    /// Resolve `kind` with its conventional policy.
    pub fn resolve(&self, kind: ResourceKind, user_path: Option<&str>) -> Result<Resolution> {
        self.resolve_with(
            kind,
            user_path,
            kind.is_mandatory(),
            kind.subdirectory(),
            kind.exclusion(),
        )
    }

    /// Resolve `kind` with an explicit policy.
    pub fn resolve_with(
        &self,
        kind: ResourceKind,
        user_path: Option<&str>,
        mandatory: bool,
        subdirectory: Option<&str>,
        exclusion: Option<&str>,
    ) -> Result<Resolution> {
        let user_path = user_path.map(str::trim).filter(|p| !p.is_empty());
        let lookup = match kind {
            ResourceKind::InitClass => self.lookup_class(kind, user_path, exclusion)?,
            _ => self.lookup_file(kind, user_path, subdirectory, exclusion)?,
        };

        match lookup {
            Lookup::Found(resolution) => Ok(resolution),
            Lookup::Missing { default_path, root } if mandatory => {
                Err(Error::MissingMandatoryResource {
                    kind,
                    default_path: default_path.to_native(),
                    root: root.to_native(),
                })
            }
            Lookup::Missing { default_path, .. } => {
                tracing::warn!(
                    "No {} resource found (default {} absent, scan empty); leaving it unset",
                    kind,
                    default_path
                );
                Ok(Resolution::NotFound)
            }
        }
    }

    fn lookup_file(
        &self,
        kind: ResourceKind,
        user_path: Option<&str>,
        subdirectory: Option<&str>,
        exclusion: Option<&str>,
    ) -> Result<Lookup> {
        if let Some(user_path) = user_path {
            let relative = NormalizedPath::new(user_path.trim_start_matches(['/', '\\']));
            if relative.as_str().split('/').any(|segment| segment == "..") {
                return Err(Error::InvalidUserResource {
                    kind,
                    path: relative.to_native(),
                    reason: "the path leaves the resource root".to_string(),
                });
            }
            let absolute = self.layout.resource(relative.as_str());
            if !absolute.is_file() {
                return Err(Error::MissingUserResource {
                    kind,
                    path: absolute.to_native(),
                });
            }
            tracing::info!("Using configured {} resource {}", kind, relative);
            return Ok(Lookup::found(relative));
        }

        let relative = NormalizedPath::new(ProjectPath::ResourcePackage.as_str())
            .join(subdirectory.unwrap_or(""))
            .join(&kind.default_file_name(&self.stem));
        let default_path = self.layout.resource(relative.as_str());
        if default_path.is_file() {
            tracing::info!("Using default {} resource {}", kind, relative);
            return Ok(Lookup::found(relative));
        }

        let root = self.layout.resources_root();
        let filter =
            ScanFilter::new(kind.file_extension(), kind.identifier()).excluding(exclusion);
        if let Some(candidate) = FileScan::new(root.clone()).first_match(&filter) {
            tracing::info!(
                "Default {} resource {} absent; found {} by scanning",
                kind,
                relative,
                candidate
            );
            return Ok(Lookup::found(candidate));
        }

        Ok(Lookup::Missing { default_path, root })
    }

    fn lookup_class(
        &self,
        kind: ResourceKind,
        user_class: Option<&str>,
        exclusion: Option<&str>,
    ) -> Result<Lookup> {
        let java_root = self.layout.java_root();

        if let Some(class_name) = user_class {
            let source = java_root.join(&class_source_path(class_name));
            if !source.is_file() {
                return Err(Error::MissingUserResource {
                    kind,
                    path: source.to_native(),
                });
            }
            tracing::info!("Using configured initialization class {}", class_name);
            return Ok(Lookup::Found(Resolution::Resolved(class_name.to_string())));
        }

        let relative = NormalizedPath::new(ProjectPath::InitPackage.as_str())
            .join(&kind.default_file_name(&self.stem));
        let default_path = java_root.join(relative.as_str());
        if default_path.is_file() {
            let class_name = class_name(&relative);
            tracing::info!("Using default initialization class {}", class_name);
            return Ok(Lookup::Found(Resolution::Resolved(class_name)));
        }

        let filter =
            ScanFilter::new(kind.file_extension(), kind.identifier()).excluding(exclusion);
        if let Some(candidate) = FileScan::new(java_root.clone()).first_match(&filter) {
            let class_name = class_name(&candidate);
            tracing::info!(
                "Default initialization class {} absent; found {} by scanning",
                relative,
                class_name
            );
            return Ok(Lookup::Found(Resolution::Resolved(class_name)));
        }

        Ok(Lookup::Missing {
            default_path,
            root: java_root,
        })
    }
}

/// Internal outcome of the three lookup steps, before the mandatory policy.
enum Lookup {
    Found(Resolution),
    Missing {
        default_path: NormalizedPath,
        root: NormalizedPath,
    },
}

impl Lookup {
    fn found(path: NormalizedPath) -> Self {
        Self::Found(Resolution::Resolved(path.into()))
    }
}

/// `com/rapidminer/PluginInitX.java` -> `com.rapidminer.PluginInitX`
fn class_name(source: &NormalizedPath) -> String {
    source.without_extension().as_str().replace('/', ".")
}

/// `com.rapidminer.PluginInitX` -> `com/rapidminer/PluginInitX.java`
fn class_source_path(class_name: &str) -> String {
    format!("{}.java", class_name.replace('.', "/"))
}

/// The configured resource locations, before resolution.
///
/// Resolution consumes the set, so every slot is resolved exactly once.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    slots: BTreeMap<ResourceKind, Option<String>>,
}

impl ResourceSet {
    pub fn from_paths(paths: &ResourcePaths) -> Self {
        let slots = ResourceKind::ALL
            .iter()
            .map(|&kind| (kind, paths.get(kind).map(String::from)))
            .collect();
        Self { slots }
    }

    /// Resolve every slot. The first failure aborts the remaining slots.
    pub fn resolve(self, locator: &ResourceLocator<'_>) -> Result<ResolvedResources> {
        let mut entries = BTreeMap::new();
        for (kind, user_path) in self.slots {
            let resolution = locator.resolve(kind, user_path.as_deref())?;
            entries.insert(kind, resolution);
        }
        Ok(ResolvedResources { entries })
    }
}

/// Resolution outcome for every resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResources {
    entries: BTreeMap<ResourceKind, Resolution>,
}

impl ResolvedResources {
    /// The resolution for `kind`; kinds never resolved read as `NotFound`.
    pub fn get(&self, kind: ResourceKind) -> &Resolution {
        static NOT_FOUND: Resolution = Resolution::NotFound;
        self.entries.get(&kind).unwrap_or(&NOT_FOUND)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &Resolution)> {
        self.entries.iter().map(|(kind, resolution)| (*kind, resolution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        assert_eq!(
            ResourceKind::Operators.default_file_name("WebMining"),
            "OperatorsWebMining.xml"
        );
        assert_eq!(
            ResourceKind::UserErrors.default_file_name("WebMining"),
            "UserErrorMessagesWebMining.properties"
        );
        assert_eq!(
            ResourceKind::InitClass.default_file_name("WebMining"),
            "PluginInitWebMining.java"
        );
    }

    #[test]
    fn test_only_init_class_and_operators_are_mandatory() {
        let mandatory: Vec<ResourceKind> = ResourceKind::ALL
            .into_iter()
            .filter(ResourceKind::is_mandatory)
            .collect();
        assert_eq!(mandatory, vec![ResourceKind::InitClass, ResourceKind::Operators]);
    }

    #[test]
    fn test_manifest_keys_are_unique() {
        let keys: std::collections::HashSet<&str> =
            ResourceKind::ALL.iter().map(|k| k.manifest_key()).collect();
        assert_eq!(keys.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_class_name_conversion() {
        assert_eq!(
            class_name(&NormalizedPath::new("com/rapidminer/PluginInitWebMining.java")),
            "com.rapidminer.PluginInitWebMining"
        );
        assert_eq!(
            class_source_path("com.rapidminer.PluginInitWebMining"),
            "com/rapidminer/PluginInitWebMining.java"
        );
    }

    #[test]
    fn test_unresolved_kind_reads_as_not_found() {
        let resolved = ResolvedResources {
            entries: BTreeMap::new(),
        };
        assert_eq!(resolved.get(ResourceKind::Gui), &Resolution::NotFound);
        assert_eq!(resolved.get(ResourceKind::Gui).manifest_value(), "");
    }
}

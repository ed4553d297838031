//! Manifest attribute assembly.
//!
//! Assembly runs in two phases. [`ManifestAssembler::check`] validates the
//! inputs without producing anything and fails on the first violation.
//! [`ManifestAssembler::assign`] then derives every attribute; it cannot fail.
//! Every attribute is always present: unset optional values become empty
//! strings, because the packaging step expects the full key set.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use rmx_fs::{NormalizedPath, ProjectLayout, io};
use serde::Serialize;

use crate::dependency::{ResolvedDependencies, extension_id};
use crate::descriptor::ExtensionDescriptor;
use crate::error::{Error, Result};
use crate::locator::{ResolvedResources, ResourceKind};

/// Value of the `Manifest-Version` attribute.
pub const MANIFEST_VERSION: &str = "1.0";

/// Value of the `RapidMiner-Type` attribute.
pub const EXTENSION_TYPE: &str = "RapidMiner_Extension";

/// Manifest attribute names that do not belong to a resource kind.
pub mod keys {
    pub const MANIFEST_VERSION: &str = "Manifest-Version";
    pub const VENDOR: &str = "Implementation-Vendor";
    pub const VENDOR_ID: &str = "Implementation-Vendor-Id";
    pub const TITLE: &str = "Implementation-Title";
    pub const URL: &str = "Implementation-URL";
    pub const IMPLEMENTATION_VERSION: &str = "Implementation-Version";
    pub const SPECIFICATION_VERSION: &str = "Specification-Version";
    pub const PLATFORM_VERSION: &str = "RapidMiner-Version";
    pub const EXTENSION_TYPE: &str = "RapidMiner-Type";
    pub const PLUGIN_DEPENDENCIES: &str = "Plugin-Dependencies";
    pub const EXTENSION_ID: &str = "Extension-ID";
    pub const NAMESPACE: &str = "Namespace";
}

/// Maximum length in bytes of one rendered manifest line, newline excluded.
pub const MAX_LINE_BYTES: usize = 72;

/// Final manifest attributes, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedManifest {
    attributes: BTreeMap<String, String>,
}

impl ResolvedManifest {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Render as `Key: Value` lines, the jar manifest text format.
    ///
    /// Lines longer than [`MAX_LINE_BYTES`] continue on the next line after a
    /// single leading space.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            push_wrapped(&mut out, &format!("{key}: {value}"));
        }
        out
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(key.to_string(), value.into());
    }
}

/// Everything the manifest is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct ManifestInputs<'a> {
    pub layout: &'a ProjectLayout,
    pub descriptor: &'a ExtensionDescriptor,
    /// Build version of the extension.
    pub version: &'a str,
    pub resources: &'a ResolvedResources,
    pub dependencies: &'a ResolvedDependencies,
}

/// Checks and assembles the manifest of one extension.
#[derive(Debug, Clone, Copy)]
pub struct ManifestAssembler<'a> {
    inputs: ManifestInputs<'a>,
}

impl<'a> ManifestAssembler<'a> {
    pub fn new(inputs: ManifestInputs<'a>) -> Self {
        Self { inputs }
    }

    /// Check, then assign.
    pub fn assemble(&self) -> Result<ResolvedManifest> {
        self.check()?;
        Ok(self.assign())
    }

    /// Validate mandatory fields and cross references.
    pub fn check(&self) -> Result<()> {
        let descriptor = self.inputs.descriptor;
        require("name", &descriptor.name)?;
        require("group_id", &descriptor.group_id)?;
        require("version", self.inputs.version)?;
        require("vendor", descriptor.vendor.as_deref().unwrap_or(""))?;

        if let Some(operators) = self.inputs.resources.get(ResourceKind::Operators).value() {
            self.check_docbundle(operators)?;
        }

        let manifest = self.assign();
        if let Some((key, _)) = manifest
            .iter()
            .find(|(_, value)| value.chars().any(char::is_control))
        {
            return Err(Error::InvalidManifestValue {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Derive every manifest attribute.
    pub fn assign(&self) -> ResolvedManifest {
        let ManifestInputs {
            descriptor,
            version,
            resources,
            dependencies,
            ..
        } = self.inputs;

        let mut manifest = ResolvedManifest::default();
        manifest.set(keys::MANIFEST_VERSION, MANIFEST_VERSION);
        manifest.set(keys::VENDOR, descriptor.vendor.clone().unwrap_or_default());
        manifest.set(keys::VENDOR_ID, descriptor.group_id.as_str());
        manifest.set(keys::TITLE, descriptor.name.as_str());
        manifest.set(keys::URL, descriptor.homepage.clone().unwrap_or_default());
        manifest.set(keys::IMPLEMENTATION_VERSION, version);
        manifest.set(keys::SPECIFICATION_VERSION, version);
        manifest.set(keys::PLATFORM_VERSION, dependencies.platform_version.as_str());
        manifest.set(keys::EXTENSION_TYPE, EXTENSION_TYPE);
        manifest.set(keys::PLUGIN_DEPENDENCIES, dependencies.plugin_dependencies());
        manifest.set(keys::EXTENSION_ID, extension_id(&descriptor.namespace));
        manifest.set(keys::NAMESPACE, descriptor.namespace.as_str());

        for kind in ResourceKind::ALL {
            manifest.set(kind.manifest_key(), resources.get(kind).manifest_value());
        }

        manifest
    }

    fn check_docbundle(&self, operators: &str) -> Result<()> {
        let path = self.inputs.layout.resource(operators);
        let content = io::read_bytes(&path)?;

        let docbundle =
            read_docbundle(&content).map_err(|e| Error::MalformedExistingResource {
                kind: ResourceKind::Operators,
                path: path.to_native(),
                reason: e.to_string(),
            })?;

        let bundle_path = docbundle_path(self.inputs.layout, &docbundle);
        if !bundle_path.is_file() {
            return Err(Error::MalformedExistingResource {
                kind: ResourceKind::Operators,
                path: path.to_native(),
                reason: format!(
                    "docbundle '{}' refers to {}, which does not exist",
                    docbundle, bundle_path
                ),
            });
        }
        tracing::debug!("Operator docbundle {} found at {}", docbundle, bundle_path);
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingMandatoryField { field });
    }
    Ok(())
}

fn push_wrapped(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_BYTES;
    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push('\n');
            return;
        }
        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        out.push_str("\n ");
        rest = &rest[split..];
        limit = MAX_LINE_BYTES - 1;
    }
}

/// Why the docbundle of an operator definition document could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocbundleError {
    #[error("the document is not well-formed XML: {0}")]
    Xml(String),

    #[error("the document has no root element")]
    NoRootElement,

    #[error("the root element is <{0}>, expected <operators>")]
    UnexpectedRoot(String),

    #[error("the <operators> element has no docbundle attribute")]
    MissingAttribute,
}

/// The `docbundle` attribute of an operator definition document.
///
/// Only the root element is read. The declared encoding is honoured and
/// entities are decoded. Blank values count as absent.
pub fn read_docbundle(content: &[u8]) -> std::result::Result<String, DocbundleError> {
    let mut reader = Reader::from_reader(content);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| DocbundleError::Xml(e.to_string()))?;
        let root = match event {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => return Err(DocbundleError::NoRootElement),
            _ => continue,
        };

        if root.local_name().as_ref() != b"operators" {
            let name = String::from_utf8_lossy(root.name().as_ref()).into_owned();
            return Err(DocbundleError::UnexpectedRoot(name));
        }
        for attr in root.attributes() {
            let attr = attr.map_err(|e| DocbundleError::Xml(e.to_string()))?;
            if attr.key.local_name().as_ref() != b"docbundle" {
                continue;
            }
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|e| DocbundleError::Xml(e.to_string()))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(DocbundleError::MissingAttribute);
            }
            return Ok(value.to_string());
        }
        return Err(DocbundleError::MissingAttribute);
    }
}

/// File a docbundle refers to: `<resources>/<docbundle>.xml`.
///
/// A value that already ends in `.xml` is taken as is.
pub fn docbundle_path(layout: &ProjectLayout, docbundle: &str) -> NormalizedPath {
    let relative = docbundle.trim_start_matches(['/', '\\']);
    if relative.ends_with(".xml") {
        layout.resource(relative)
    } else {
        layout.resource(&format!("{relative}.xml"))
    }
}

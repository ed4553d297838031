//! Install-dir command

use std::path::Path;

use rmx_extension::{Error, ExtensionDescriptor, ProjectConfig};

use crate::error::Result;

/// Print the install target of the extension project at `project`.
pub fn run_install_dir(project: &Path) -> Result<()> {
    let config = ProjectConfig::from_project_dir(project)?;
    let extension = config
        .extension
        .as_ref()
        .ok_or_else(|| Error::NotAnExtensionProject {
            project: project.display().to_string(),
        })?;

    let descriptor = ExtensionDescriptor::from_config(extension)?;
    println!("{}", descriptor.install_target()?.display());
    Ok(())
}

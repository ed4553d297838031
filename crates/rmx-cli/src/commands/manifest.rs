//! Manifest command

use std::path::Path;

use colored::Colorize;
use rmx_extension::resolve_project;

use crate::error::Result;

/// Resolve the project at `project` and print its manifest.
///
/// Plain output is the jar manifest text, so it can be redirected straight
/// into a `MANIFEST.MF`.
pub fn run_manifest(project: &Path, build_version: Option<&str>, json: bool) -> Result<()> {
    let resolved = resolve_project(project, build_version)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved.report())?);
        return Ok(());
    }

    print!("{}", resolved.manifest.render());
    eprintln!(
        "{} {} {} ({} attributes)",
        "Resolved".green().bold(),
        resolved.descriptor.name,
        resolved.version,
        resolved.manifest.len()
    );
    Ok(())
}

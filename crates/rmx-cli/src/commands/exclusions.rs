//! Exclusions command

use std::path::Path;

use rmx_extension::ResolvedGraph;
use rmx_fs::{ConfigStore, NormalizedPath};

use crate::error::{CliError, Result};

/// Print every module reachable from the provided dependencies of a
/// resolved graph, one `group:name:version` per line, sorted.
pub fn run_exclusions(graph: &Path, json: bool) -> Result<()> {
    let path = NormalizedPath::new(graph);
    if !path.is_file() {
        return Err(CliError::user(format!(
            "dependency graph not found: {}",
            graph.display()
        )));
    }

    let graph: ResolvedGraph = ConfigStore::new().load(&path)?;
    let exclusions = graph.exclusions().to_sorted_vec();
    tracing::debug!(
        "{} of {} modules excluded",
        exclusions.len(),
        graph.modules.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&exclusions)?);
    } else {
        for coordinate in exclusions {
            println!("{coordinate}");
        }
    }
    Ok(())
}

//! Read-only directory scanning for heuristic file discovery
//!
//! Directories are walked depth-first with entries sorted by file name, so the
//! "first match" of a scan is the same on every filesystem.

use walkdir::WalkDir;

use crate::NormalizedPath;

/// File name criteria for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanFilter<'a> {
    /// Required file extension, without the dot.
    pub extension: &'a str,
    /// Substring the file name must contain.
    pub contains: &'a str,
    /// Substring the file name must not contain.
    pub excludes: Option<&'a str>,
}

impl<'a> ScanFilter<'a> {
    pub fn new(extension: &'a str, contains: &'a str) -> Self {
        Self {
            extension,
            contains,
            excludes: None,
        }
    }

    /// Reject file names containing `excludes`.
    pub fn excluding(mut self, excludes: Option<&'a str>) -> Self {
        self.excludes = excludes.filter(|s| !s.is_empty());
        self
    }

    /// Whether `file_name` passes the name criteria.
    ///
    /// The extension is checked separately by the scan.
    pub fn matches(&self, file_name: &str) -> bool {
        if !file_name.contains(self.contains) {
            return false;
        }
        match self.excludes {
            Some(excluded) => !file_name.contains(excluded),
            None => true,
        }
    }
}

/// A scan rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileScan {
    root: NormalizedPath,
}

impl FileScan {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// All files below the root carrying `extension`, relative to the root,
    /// in traversal order.
    ///
    /// A missing root yields an empty list. Unreadable entries are skipped.
    /// Symlinks to files are listed under the link's own path.
    pub fn files_with_extension(&self, extension: &str) -> Vec<NormalizedPath> {
        let mut files = Vec::new();

        for entry in WalkDir::new(self.root.to_native())
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", self.root, e);
                    None
                }
            })
        {
            // Follows file symlinks; directory symlinks are not descended into.
            if !entry.path().is_file() {
                continue;
            }
            let path = NormalizedPath::new(entry.path());
            if path.extension() != Some(extension) {
                continue;
            }
            if let Some(relative) = path.relative_to(&self.root) {
                files.push(relative);
            }
        }

        files
    }

    /// The first file, in traversal order, accepted by `filter`.
    pub fn first_match(&self, filter: &ScanFilter<'_>) -> Option<NormalizedPath> {
        self.files_with_extension(filter.extension)
            .into_iter()
            .find(|candidate| {
                let file_name = candidate.file_name().unwrap_or_default();
                let accepted = filter.matches(file_name);
                if !accepted && file_name.contains(filter.contains) {
                    tracing::debug!(
                        "Scan candidate {} rejected by exclusion {:?}",
                        candidate,
                        filter.excludes
                    );
                }
                accepted
            })
    }
}

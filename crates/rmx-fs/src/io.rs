//! Read-only file access

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Canonicalize an existing path without the Windows `\\?\` prefix.
pub fn canonicalize(path: &NormalizedPath) -> Result<NormalizedPath> {
    let native_path = path.to_native();
    dunce::canonicalize(&native_path)
        .map(NormalizedPath::new)
        .map_err(|e| Error::io(&native_path, e))
}

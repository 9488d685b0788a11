#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use crate::wad::error::{WadError, WadResult};

/// Maps a record name onto a file under `root`.
///
/// Names are normalized to forward slashes; absolute names, drive prefixes and
/// `..` components are refused.
pub fn output_path(root: &Path, name: &str) -> WadResult<PathBuf> {
    let norm = name.replace('\\', "/");
    if norm.is_empty() || norm.starts_with('/') || norm.contains(':') {
        return Err(WadError::Outside(name.to_string()));
    }

    let mut out = root.to_path_buf();
    for comp in norm.split('/') {
        match comp {
            "" | "." => continue,
            ".." => return Err(WadError::Outside(name.to_string())),
            c => out.push(c),
        }
    }

    if out == root {
        return Err(WadError::Outside(name.to_string()));
    }
    Ok(out)
}

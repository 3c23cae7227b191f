//! Local directory enumeration

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// List the file names in a directory, non-recursively, in
/// lexicographic order.
///
/// Subdirectories are ignored; only regular files participate in a
/// sync run. The sorted order makes repeated runs process items
/// identically, so logs stay comparable across retries.
pub fn list_local_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::InvalidPath(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            Error::Enumeration(format!("Failed to list {}: {}", dir.display(), e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            // Remote keys are strings; a lossy conversion could
            // collide keys and break the skip logic.
            None => {
                return Err(Error::Enumeration(format!(
                    "File name is not valid UTF-8: {:?}",
                    entry.file_name()
                )))
            }
        }
    }

    names.sort();
    debug!("Enumerated {} files in {}", names.len(), dir.display());
    Ok(names)
}

//! Common assertions for ferry testing

use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::fakes::InMemoryRemote;

/// Asserts that every top-level file of `dir` exists in `remote` at
/// `prefix + name` with identical bytes.
pub fn assert_synced(remote: &InMemoryRemote, prefix: &str, dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let key = format!("{}{}", prefix, name);

        let stored = remote
            .get(&key)
            .unwrap_or_else(|| panic!("Missing remote object for {:?}", key));

        let local = std::fs::read(entry.path())?;
        assert_eq!(
            stored.bytes, local,
            "Content mismatch for {:?}",
            key
        );
    }

    Ok(())
}

/// Asserts the final counters of a run
pub fn assert_counts(stats: &ferry_core::RunStats, uploaded: u64, skipped: u64, errors: u64) {
    assert_eq!(stats.uploaded, uploaded, "uploaded count");
    assert_eq!(stats.skipped, skipped, "skipped count");
    assert_eq!(stats.errors, errors, "errors count");
    assert_eq!(
        stats.processed(),
        uploaded + skipped + errors,
        "counter invariant"
    );
}

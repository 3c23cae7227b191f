//! Idempotent directory-to-bucket synchronization
//!
//! The runner enumerates local files and existing remote keys once,
//! then uploads every file whose derived key is absent from the remote
//! snapshot. A failed upload is counted and reported but never aborts
//! the run; re-invoking the runner retries failed items automatically
//! because they are still missing from the rebuilt index.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::local::list_local_files;
use crate::progress::SyncObserver;
use crate::stats::RunStats;

/// Default number of processed items between progress callbacks
pub const DEFAULT_REPORT_INTERVAL: usize = 200;

/// Remote object storage collaborator.
///
/// Implementations must support a prefix-scoped full listing and a
/// plain object write. Pagination, credentials and transport concerns
/// live behind this trait, which also allows tests to substitute an
/// in-memory fake for the real bucket.
pub trait RemoteStore {
    /// List every key under `prefix` as a single full scan.
    fn list_keys(&self, prefix: &str) -> Result<HashSet<String>>;

    /// Write `bytes` at `key`, attaching `cache_control` when given.
    fn put_object(&self, key: &str, bytes: Vec<u8>, cache_control: Option<&str>) -> Result<()>;
}

/// Options for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Key prefix prepended (literally, no separator inserted) to
    /// every local file name to form its remote key
    pub prefix: String,
    /// Cache-control directive attached to uploaded objects
    pub cache_control: Option<String>,
    /// Emit a progress callback every this many processed items;
    /// zero disables periodic reporting
    pub report_interval: usize,
    /// Enumerate and report without writing anything
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            cache_control: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
            dry_run: false,
        }
    }
}

/// Outcome of processing a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was uploaded
    Uploaded,
    /// The item's key was already present remotely
    Skipped,
    /// The upload failed; the run continued
    Failed,
    /// Dry run only: the item would have been uploaded
    WouldUpload,
}

/// Synchronize the files of `dir` into `store` under `options.prefix`.
///
/// Items are processed sequentially in lexicographic order. Local or
/// remote enumeration failures are fatal and occur before any item is
/// processed; per-item upload failures are counted and reported via
/// `observer` without aborting. Returns the final counters.
pub fn sync_directory(
    store: &dyn RemoteStore,
    dir: &Path,
    options: &SyncOptions,
    observer: &dyn SyncObserver,
) -> Result<RunStats> {
    let names = list_local_files(dir)?;
    let total = names.len() as u64;
    info!("Found {} files in {}", total, dir.display());

    // One full scan up front bounds remote round-trips by the listing
    // page count instead of the local item count.
    let existing = store.list_keys(&options.prefix)?;
    info!("Found {} existing objects under '{}'", existing.len(), options.prefix);

    observer.on_start(names.len(), existing.len());

    let mut stats = RunStats::new();

    for name in &names {
        let key = format!("{}{}", options.prefix, name);

        let outcome = if existing.contains(&key) {
            stats.skipped += 1;
            ItemOutcome::Skipped
        } else if options.dry_run {
            stats.uploaded += 1;
            ItemOutcome::WouldUpload
        } else {
            match upload_item(store, dir, name, &key, options) {
                Ok(()) => {
                    stats.uploaded += 1;
                    ItemOutcome::Uploaded
                }
                Err(err) => {
                    stats.errors += 1;
                    warn!("Upload failed for {}: {}", name, err);
                    observer.on_item_error(name, &err);
                    ItemOutcome::Failed
                }
            }
        };

        observer.on_item(name, outcome);

        if options.report_interval > 0
            && stats.processed() % options.report_interval as u64 == 0
        {
            observer.on_progress(&stats, total);
        }
    }

    observer.on_complete(&stats, total);
    Ok(stats)
}

/// Read one file and write it to the remote store.
///
/// Any failure here, filesystem or storage, is an item-level error.
fn upload_item(
    store: &dyn RemoteStore,
    dir: &Path,
    name: &str,
    key: &str,
    options: &SyncOptions,
) -> Result<()> {
    let bytes = fs::read(dir.join(name)).map_err(|e| Error::Upload {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    debug!("Uploading {} bytes to {}", bytes.len(), key);
    store
        .put_object(key, bytes, options.cache_control.as_deref())
        .map_err(|e| Error::Upload {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

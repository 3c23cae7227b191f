//! Ferry - idempotent directory-to-bucket synchronization library
//!
//! This library provides the core engine for uploading the files of a
//! local directory to an object storage bucket, skipping files whose
//! derived remote key already exists. Enumeration happens once per
//! run, items are processed sequentially in sorted order, and a single
//! item's failure never aborts the batch.

pub mod config;
pub mod error;
pub mod local;
pub mod progress;
pub mod stats;
pub mod sync;

pub use error::{Error, Result};

// Re-export commonly used types
pub use progress::{NoSyncObserver, SyncObserver};
pub use stats::RunStats;
pub use sync::{
    sync_directory, ItemOutcome, RemoteStore, SyncOptions, DEFAULT_REPORT_INTERVAL,
};

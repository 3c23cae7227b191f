//! Progress reporting for sync runs
//!
//! This module defines the SyncObserver trait, which decouples the
//! sync engine from any specific output technology. The CLI provides a
//! line-oriented stdout implementation; tests use recording observers.

use crate::error::Error;
use crate::stats::RunStats;
use crate::sync::ItemOutcome;

/// Receives callbacks during a sync run.
///
/// All methods are called synchronously from the single execution
/// path, in item order, and default to no-ops.
pub trait SyncObserver {
    /// Called once after local and remote enumeration, before any item
    /// is processed.
    fn on_start(&self, total: usize, existing: usize) {
        let _ = (total, existing);
    }

    /// Called after each item with its outcome.
    fn on_item(&self, name: &str, outcome: ItemOutcome) {
        let _ = (name, outcome);
    }

    /// Called when an item fails, with the offending name and cause.
    fn on_item_error(&self, name: &str, error: &Error) {
        let _ = (name, error);
    }

    /// Called every reporting interval with the running counters.
    fn on_progress(&self, stats: &RunStats, total: u64) {
        let _ = (stats, total);
    }

    /// Called once after the last item, regardless of cadence alignment.
    fn on_complete(&self, stats: &RunStats, total: u64) {
        let _ = (stats, total);
    }
}

/// No-op observer
pub struct NoSyncObserver;

impl SyncObserver for NoSyncObserver {}

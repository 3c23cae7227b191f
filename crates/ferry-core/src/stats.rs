//! Aggregate counters for a sync run

use std::time::{Duration, Instant};

/// Mutable counters owned by a single sync run.
///
/// The invariant `uploaded + skipped + errors == items processed so
/// far` holds at every item boundary. Rate and ETA are averages since
/// the start of the run, which is acceptable because per-item cost is
/// roughly uniform.
#[derive(Debug)]
pub struct RunStats {
    /// Items uploaded in this run
    pub uploaded: u64,
    /// Items skipped because their key was already present
    pub skipped: u64,
    /// Items whose upload failed
    pub errors: u64,
    started: Instant,
}

impl RunStats {
    /// Fresh counters, started now
    pub fn new() -> Self {
        Self {
            uploaded: 0,
            skipped: 0,
            errors: 0,
            started: Instant::now(),
        }
    }

    /// Number of items processed so far
    pub fn processed(&self) -> u64 {
        self.uploaded + self.skipped + self.errors
    }

    /// Time elapsed since the run started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average items per second since the run started
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.processed() as f64 / secs
        } else {
            0.0
        }
    }

    /// Estimated seconds remaining at the observed average rate
    pub fn eta_seconds(&self, total: u64) -> f64 {
        let rate = self.rate();
        if rate > 0.0 {
            total.saturating_sub(self.processed()) as f64 / rate
        } else {
            0.0
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

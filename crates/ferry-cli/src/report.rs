//! Line-oriented console reporting for sync runs

use std::sync::Mutex;
use std::time::Duration;

use ferry_core::{Error, ItemOutcome, RunStats, SyncObserver};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Stdout reporter for `ferry sync`.
///
/// Emits the enumeration summary, one progress line per reporting
/// interval, per-item error lines on stderr, and the final summary.
/// With the bar enabled, lines are routed through it so they do not
/// clobber the rendering.
pub struct ConsoleReporter {
    quiet: bool,
    show_bar: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    /// Create a reporter; `show_bar` adds an indicatif progress bar
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        Self {
            quiet,
            show_bar,
            bar: Mutex::new(None),
        }
    }

    fn emit(&self, line: &str) {
        if self.quiet {
            return;
        }
        match self.bar.lock().unwrap().as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }
}

impl SyncObserver for ConsoleReporter {
    fn on_start(&self, total: usize, existing: usize) {
        self.emit(&format!("Found {} files to upload", total));
        self.emit(&format!(
            "Found {} existing objects, will skip those",
            existing
        ));

        if self.show_bar && !self.quiet {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar.set_message("Syncing");
            bar.enable_steady_tick(Duration::from_millis(100));
            *self.bar.lock().unwrap() = Some(bar);
        }
    }

    fn on_item(&self, _name: &str, _outcome: ItemOutcome) {
        if let Some(bar) = self.bar.lock().unwrap().as_ref() {
            bar.inc(1);
        }
    }

    fn on_item_error(&self, name: &str, error: &Error) {
        eprintln!("  ERROR {}: {}", name, error);
    }

    fn on_progress(&self, stats: &RunStats, total: u64) {
        let eta_min = stats.eta_seconds(total) / 60.0;
        self.emit(&format!(
            "  {}/{} ({} up, {} skip, {} err) - {:.1}/s - ETA {:.0}min",
            stats.processed(),
            total,
            stats.uploaded,
            stats.skipped,
            stats.errors,
            stats.rate(),
            eta_min
        ));
    }

    fn on_complete(&self, stats: &RunStats, _total: u64) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
        self.emit(&format!(
            "\nDone in {:.1} min: {} uploaded, {} skipped, {} errors",
            stats.elapsed().as_secs_f64() / 60.0,
            stats.uploaded,
            stats.skipped,
            stats.errors
        ));
    }
}

/// One entry of a `ferry plan` run
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    /// Local file name
    pub name: String,
    /// Derived remote key
    pub key: String,
    /// `upload` or `skip`
    pub action: &'static str,
}

/// Observer for `ferry plan`: prints one line per would-be upload, or
/// collects entries for JSON output.
pub struct PlanReporter {
    prefix: String,
    json: bool,
    entries: Mutex<Vec<PlanEntry>>,
}

impl PlanReporter {
    /// Create a plan reporter; with `json` the report is collected
    /// and printed as a single document at the end
    pub fn new(prefix: &str, json: bool) -> Self {
        Self {
            prefix: prefix.to_string(),
            json,
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl SyncObserver for PlanReporter {
    fn on_item(&self, name: &str, outcome: ItemOutcome) {
        let action = match outcome {
            ItemOutcome::WouldUpload => "upload",
            ItemOutcome::Skipped => "skip",
            // Plan runs never write, so no other outcome occurs
            _ => return,
        };

        if self.json {
            self.entries.lock().unwrap().push(PlanEntry {
                name: name.to_string(),
                key: format!("{}{}", self.prefix, name),
                action,
            });
        } else if action == "upload" {
            println!("+ {}", name);
        }
    }

    fn on_complete(&self, stats: &RunStats, _total: u64) {
        if self.json {
            let entries = self.entries.lock().unwrap();
            match serde_json::to_string_pretty(&*entries) {
                Ok(doc) => println!("{}", doc),
                Err(e) => eprintln!("Failed to serialize plan: {}", e),
            }
        } else {
            println!(
                "{} to upload, {} already present",
                stats.uploaded, stats.skipped
            );
        }
    }
}

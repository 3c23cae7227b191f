//! End-to-end tests for the sync runner against an in-memory remote

use std::sync::Mutex;

use ferry_core::progress::{NoSyncObserver, SyncObserver};
use ferry_core::stats::RunStats;
use ferry_core::sync::{sync_directory, ItemOutcome, SyncOptions};
use ferry_core::Error;
use ferry_testing::assertions::{assert_counts, assert_synced};
use ferry_testing::fakes::InMemoryRemote;
use ferry_testing::fixtures::{create_numbered_files, create_sync_files};
use ferry_testing::TestDir;

fn options(prefix: &str) -> SyncOptions {
    SyncOptions {
        prefix: prefix.to_string(),
        ..Default::default()
    }
}

/// Observer that records item order and progress checkpoints
#[derive(Default)]
struct RecordingObserver {
    items: Mutex<Vec<(String, ItemOutcome)>>,
    progress_at: Mutex<Vec<u64>>,
    completed_at: Mutex<Option<u64>>,
    failures: Mutex<Vec<String>>,
}

impl SyncObserver for RecordingObserver {
    fn on_item(&self, name: &str, outcome: ItemOutcome) {
        self.items
            .lock()
            .unwrap()
            .push((name.to_string(), outcome));
    }

    fn on_item_error(&self, name: &str, _error: &Error) {
        self.failures.lock().unwrap().push(name.to_string());
    }

    fn on_progress(&self, stats: &RunStats, _total: u64) {
        self.progress_at.lock().unwrap().push(stats.processed());
    }

    fn on_complete(&self, stats: &RunStats, _total: u64) {
        *self.completed_at.lock().unwrap() = Some(stats.processed());
    }
}

#[test]
fn test_initial_run_uploads_everything() {
    let dir = TestDir::new().unwrap();
    create_sync_files(&dir).unwrap();
    let remote = InMemoryRemote::new();

    let stats =
        sync_directory(&remote, dir.path(), &options("uploads/"), &NoSyncObserver).unwrap();

    // Four top-level files; the nested directory is ignored
    assert_counts(&stats, 4, 0, 0);
    assert_eq!(remote.len(), 4);
    assert_synced(&remote, "uploads/", dir.path()).unwrap();
}

#[test]
fn test_second_run_skips_everything() {
    let dir = TestDir::new().unwrap();
    create_sync_files(&dir).unwrap();
    let remote = InMemoryRemote::new();
    let opts = options("uploads/");

    let first = sync_directory(&remote, dir.path(), &opts, &NoSyncObserver).unwrap();
    assert_counts(&first, 4, 0, 0);

    let second = sync_directory(&remote, dir.path(), &opts, &NoSyncObserver).unwrap();
    assert_counts(&second, 0, 4, 0);
    assert_eq!(remote.len(), 4);
}

#[test]
fn test_existing_keys_are_skipped() {
    // The canonical example: {a,b,c}.txt locally, uploads/b.txt remote
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();
    dir.create_file("b.txt", b"b").unwrap();
    dir.create_file("c.txt", b"c").unwrap();

    let remote = InMemoryRemote::new();
    remote.insert("uploads/b.txt", b"already there");

    let stats =
        sync_directory(&remote, dir.path(), &options("uploads/"), &NoSyncObserver).unwrap();

    assert_counts(&stats, 2, 1, 0);
    // The pre-existing object is never rewritten
    assert_eq!(
        remote.get("uploads/b.txt").unwrap().bytes,
        b"already there".to_vec()
    );
    assert!(remote.get("uploads/a.txt").is_some());
    assert!(remote.get("uploads/c.txt").is_some());
}

#[test]
fn test_single_failure_is_isolated() {
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();
    dir.create_file("b.txt", b"b").unwrap();
    dir.create_file("c.txt", b"c").unwrap();

    let remote = InMemoryRemote::new();
    remote.fail_put_for("uploads/b.txt");

    let observer = RecordingObserver::default();
    let stats = sync_directory(&remote, dir.path(), &options("uploads/"), &observer).unwrap();

    assert_counts(&stats, 2, 0, 1);
    assert_eq!(*observer.failures.lock().unwrap(), vec!["b.txt"]);
    // The run reached the final summary despite the failure
    assert_eq!(*observer.completed_at.lock().unwrap(), Some(3));
    assert!(remote.get("uploads/a.txt").is_some());
    assert!(remote.get("uploads/b.txt").is_none());
    assert!(remote.get("uploads/c.txt").is_some());
}

#[test]
fn test_failed_item_is_retried_on_next_run() {
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();
    dir.create_file("b.txt", b"b").unwrap();

    let remote = InMemoryRemote::new();
    remote.fail_put_for("uploads/b.txt");
    let opts = options("uploads/");

    let first = sync_directory(&remote, dir.path(), &opts, &NoSyncObserver).unwrap();
    assert_counts(&first, 1, 0, 1);

    // Next invocation finds the key still missing and retries it
    remote.clear_put_fault("uploads/b.txt");
    let second = sync_directory(&remote, dir.path(), &opts, &NoSyncObserver).unwrap();
    assert_counts(&second, 1, 1, 0);
    assert_eq!(remote.get("uploads/b.txt").unwrap().bytes, b"b".to_vec());
}

#[test]
fn test_fatal_remote_listing() {
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();

    let remote = InMemoryRemote::new();
    remote.fail_listing();

    let err =
        sync_directory(&remote, dir.path(), &options("uploads/"), &NoSyncObserver).unwrap_err();
    assert!(matches!(err, Error::Enumeration(_)));
    // Nothing was uploaded before the abort
    assert!(remote.is_empty());
}

#[test]
fn test_missing_source_directory_is_fatal() {
    let remote = InMemoryRemote::new();
    let err = sync_directory(
        &remote,
        std::path::Path::new("/nonexistent/sync/source"),
        &options("uploads/"),
        &NoSyncObserver,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));
}

#[test]
fn test_items_are_processed_in_sorted_order() {
    let dir = TestDir::new().unwrap();
    for name in ["zebra.txt", "apple.txt", "mango.txt"] {
        dir.create_file(name, b"x").unwrap();
    }

    let remote = InMemoryRemote::new();
    let observer = RecordingObserver::default();
    sync_directory(&remote, dir.path(), &options(""), &observer).unwrap();

    let names: Vec<String> = observer
        .items
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(names, vec!["apple.txt", "mango.txt", "zebra.txt"]);
}

#[test]
fn test_progress_cadence() {
    let dir = TestDir::new().unwrap();
    create_numbered_files(&dir, 5).unwrap();

    let remote = InMemoryRemote::new();
    let observer = RecordingObserver::default();
    let opts = SyncOptions {
        report_interval: 2,
        ..Default::default()
    };

    let stats = sync_directory(&remote, dir.path(), &opts, &observer).unwrap();

    // Interval 2 with 5 items: progress after items 2 and 4, never
    // after item 5; the summary still fires unconditionally.
    assert_eq!(*observer.progress_at.lock().unwrap(), vec![2, 4]);
    assert_eq!(*observer.completed_at.lock().unwrap(), Some(5));
    assert_counts(&stats, 5, 0, 0);
}

#[test]
fn test_zero_interval_disables_progress() {
    let dir = TestDir::new().unwrap();
    create_numbered_files(&dir, 3).unwrap();

    let remote = InMemoryRemote::new();
    let observer = RecordingObserver::default();
    let opts = SyncOptions {
        report_interval: 0,
        ..Default::default()
    };

    sync_directory(&remote, dir.path(), &opts, &observer).unwrap();
    assert!(observer.progress_at.lock().unwrap().is_empty());
    assert!(observer.completed_at.lock().unwrap().is_some());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();
    dir.create_file("b.txt", b"b").unwrap();

    let remote = InMemoryRemote::new();
    remote.insert("uploads/b.txt", b"b");

    let observer = RecordingObserver::default();
    let opts = SyncOptions {
        prefix: "uploads/".to_string(),
        dry_run: true,
        ..Default::default()
    };

    let stats = sync_directory(&remote, dir.path(), &opts, &observer).unwrap();

    assert_counts(&stats, 1, 1, 0);
    // Only the pre-existing object remains; nothing was written
    assert_eq!(remote.keys(), vec!["uploads/b.txt"]);

    let items = observer.items.lock().unwrap();
    assert_eq!(items[0], ("a.txt".to_string(), ItemOutcome::WouldUpload));
    assert_eq!(items[1], ("b.txt".to_string(), ItemOutcome::Skipped));
}

#[test]
fn test_cache_control_is_attached() {
    let dir = TestDir::new().unwrap();
    dir.create_file("a.txt", b"a").unwrap();

    let remote = InMemoryRemote::new();
    let opts = SyncOptions {
        prefix: "uploads/".to_string(),
        cache_control: Some("public, max-age=315360000".to_string()),
        ..Default::default()
    };

    sync_directory(&remote, dir.path(), &opts, &NoSyncObserver).unwrap();

    let stored = remote.get("uploads/a.txt").unwrap();
    assert_eq!(
        stored.cache_control.as_deref(),
        Some("public, max-age=315360000")
    );
}

#[test]
fn test_empty_directory_completes_immediately() {
    let dir = TestDir::new().unwrap();
    let remote = InMemoryRemote::new();

    let observer = RecordingObserver::default();
    let stats =
        sync_directory(&remote, dir.path(), &options("uploads/"), &observer).unwrap();

    assert_counts(&stats, 0, 0, 0);
    assert_eq!(*observer.completed_at.lock().unwrap(), Some(0));
}

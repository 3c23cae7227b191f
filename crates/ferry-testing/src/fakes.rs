//! In-memory remote store fakes for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use ferry_core::sync::RemoteStore;
use ferry_core::{Error, Result};

/// A stored object: payload plus the cache-control it was written with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object payload
    pub bytes: Vec<u8>,
    /// Cache-control directive attached at write time, if any
    pub cache_control: Option<String>,
}

/// In-memory `RemoteStore` with optional fault injection.
///
/// Interior mutability keeps the fake usable through the `&self`
/// trait methods; tests hold a shared reference and inspect contents
/// after the run.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_put_keys: Mutex<HashSet<String>>,
    fail_listing: Mutex<bool>,
}

impl InMemoryRemote {
    /// Empty store with no faults configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if a previous run had uploaded it
    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                cache_control: None,
            },
        );
    }

    /// Make `put_object` fail for this exact key
    pub fn fail_put_for(&self, key: &str) {
        self.fail_put_keys.lock().unwrap().insert(key.to_string());
    }

    /// Clear a previously injected put fault
    pub fn clear_put_fault(&self, key: &str) {
        self.fail_put_keys.lock().unwrap().remove(key);
    }

    /// Make `list_keys` fail
    pub fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Look up one stored object
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// True when no objects are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RemoteStore for InMemoryRemote {
    fn list_keys(&self, prefix: &str) -> Result<HashSet<String>> {
        if *self.fail_listing.lock().unwrap() {
            return Err(Error::Enumeration("injected listing failure".to_string()));
        }

        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn put_object(&self, key: &str, bytes: Vec<u8>, cache_control: Option<&str>) -> Result<()> {
        if self.fail_put_keys.lock().unwrap().contains(key) {
            return Err(Error::Storage(format!("injected put failure for {}", key)));
        }

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes,
                cache_control: cache_control.map(String::from),
            },
        );
        Ok(())
    }
}

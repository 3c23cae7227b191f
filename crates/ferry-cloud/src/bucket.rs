//! RemoteBucket - blocking bucket-scoped operations over an ObjectStore

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use tracing::{debug, trace};

use crate::error::Result;
use crate::runtime::get_runtime;

/// A bucket-scoped handle offering blocking list and put operations.
///
/// Bridges the async `object_store` API onto a synchronous caller
/// using a shared internal Tokio runtime, so the sync runner can stay
/// strictly sequential. Each call blocks until the remote operation
/// completes.
#[derive(Debug)]
pub struct RemoteBucket {
    /// The object store
    store: Arc<dyn ObjectStore>,
    /// Base path within the bucket, from the URL; keys are resolved
    /// relative to it
    base: ObjectPath,
}

impl RemoteBucket {
    /// Create a new RemoteBucket over an existing store
    ///
    /// # Arguments
    /// * `store` - The object store to operate on
    /// * `base` - Base path all keys are resolved under (may be empty)
    pub fn new(store: Arc<dyn ObjectStore>, base: ObjectPath) -> Self {
        Self { store, base }
    }

    /// Create from a bucket URL such as `s3://bucket` or
    /// `gs://bucket/base/path`. Credentials are read from the
    /// environment by the underlying store builder.
    pub fn from_url(url: &str) -> Result<Self> {
        let (store, base) = crate::parse_cloud_url(url)?;
        Ok(Self::new(Arc::from(store), base))
    }

    /// List every key starting with `prefix`, as a single full scan.
    ///
    /// The listing stream paginates internally; the whole result is
    /// collected into a set before returning, so the caller sees one
    /// immutable snapshot.
    pub fn list_keys(&self, prefix: &str) -> Result<HashSet<String>> {
        let scope = self.list_scope(prefix);
        debug!("Listing objects under {:?}", scope);

        let runtime = get_runtime();
        runtime.block_on(async {
            let mut stream = self.store.list(scope.as_ref());
            let mut keys = HashSet::new();

            while let Some(meta) = stream.next().await {
                let meta = meta?;
                if let Some(key) = self.relative_key(&meta.location) {
                    if key.starts_with(prefix) {
                        trace!("Found existing object {}", key);
                        keys.insert(key);
                    }
                }
            }

            Ok(keys)
        })
    }

    /// Write `bytes` at `key` in a single put, attaching a
    /// cache-control attribute when configured.
    pub fn put(&self, key: &str, bytes: Vec<u8>, cache_control: Option<&str>) -> Result<()> {
        let path = self.object_path(key);

        let mut attributes = Attributes::new();
        if let Some(directive) = cache_control {
            attributes.insert(Attribute::CacheControl, directive.to_string().into());
        }
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        debug!("Putting {} bytes at {}", bytes.len(), path);
        let runtime = get_runtime();
        runtime.block_on(async {
            self.store
                .put_opts(&path, PutPayload::from(Bytes::from(bytes)), opts)
                .await?;
            Ok(())
        })
    }

    /// Resolve a string key to a full object path under the base
    fn object_path(&self, key: &str) -> ObjectPath {
        if self.base.as_ref().is_empty() {
            ObjectPath::from(key)
        } else {
            ObjectPath::from(format!("{}/{}", self.base, key))
        }
    }

    /// Path to scope the remote listing to, derived from the string
    /// prefix.
    ///
    /// `object_store` prefixes match on `/` boundaries, so the scan is
    /// scoped to the prefix's last complete path segment and the
    /// string filter in `list_keys` narrows the rest.
    fn list_scope(&self, prefix: &str) -> Option<ObjectPath> {
        let dir = match prefix.rfind('/') {
            Some(idx) => &prefix[..idx],
            None => "",
        };

        if dir.is_empty() {
            if self.base.as_ref().is_empty() {
                None
            } else {
                Some(self.base.clone())
            }
        } else {
            Some(self.object_path(dir))
        }
    }

    /// Strip the base path off a listed location, yielding the string
    /// key comparable with `prefix + name`.
    fn relative_key(&self, location: &ObjectPath) -> Option<String> {
        let full = location.to_string();
        if self.base.as_ref().is_empty() {
            Some(full)
        } else {
            full.strip_prefix(&format!("{}/", self.base))
                .map(String::from)
        }
    }
}

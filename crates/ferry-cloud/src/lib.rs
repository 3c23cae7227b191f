//! # ferry-cloud
//!
//! Cloud storage adaptation layer for ferry. This crate provides a
//! blocking, bucket-scoped handle over the async `object_store` API so
//! that the sync runner can stay strictly sequential without dealing
//! with async complexity.
//!
//! ## Architecture
//!
//! The main abstraction is `RemoteBucket`, which offers two blocking
//! operations: a prefix-scoped full listing and a single-shot object
//! put with an optional cache-control attribute. An internal Tokio
//! runtime bridges the async `object_store` calls.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod bucket;
mod error;
mod runtime;

pub use bucket::RemoteBucket;
pub use error::{CloudError, Result};

// Re-export commonly used types from object_store
pub use object_store::{path::Path as ObjectPath, ObjectMeta, ObjectStore};

/// A parsed cloud location: provider scheme, bucket and base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudPath {
    /// Provider scheme (`s3`, `gs`, `az`, `azblob`)
    pub scheme: String,
    /// Bucket or container name
    pub bucket: String,
    /// Base path within the bucket, possibly empty
    pub path: String,
}

impl CloudPath {
    /// Parse a URL like `s3://bucket/base/path`
    pub fn parse(url: &str) -> Result<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| CloudError::InvalidPath(format!("Missing scheme: {}", url)))?;

        if scheme.is_empty() {
            return Err(CloudError::InvalidPath(format!("Empty scheme: {}", url)));
        }

        let (bucket, path) = match rest.split_once('/') {
            Some((bucket, path)) => (bucket, path),
            None => (rest, ""),
        };

        if bucket.is_empty() {
            return Err(CloudError::InvalidPath(format!(
                "Missing bucket name: {}",
                url
            )));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            path: path.trim_matches('/').to_string(),
        })
    }
}

/// Creates a cloud store from a URL string
///
/// Supports URLs like:
/// - `s3://bucket/path`
/// - `gs://bucket/path`
/// - `az://container/path`
///
/// Provider credentials are read from the environment.
pub fn parse_cloud_url(url: &str) -> Result<(Box<dyn ObjectStore>, ObjectPath)> {
    use object_store::parse_url;

    let parsed = url
        .parse::<url::Url>()
        .map_err(|e| CloudError::InvalidPath(format!("{}: {}", url, e)))?;
    let (store, path) = parse_url(&parsed)?;
    Ok((store, path))
}

//! Cloud storage handler for ferry-cli
//!
//! This module provides cloud storage integration, allowing ferry to
//! upload to S3, Google Cloud Storage, and Azure Blob Storage, and the
//! adapter that exposes a bucket to the sync engine.

use std::collections::HashSet;

use anyhow::{Context, Result};
use ferry_cloud::{CloudPath, RemoteBucket};

/// Check if a path is a cloud URL
pub fn is_cloud_path(path: &str) -> bool {
    path.starts_with("s3://")
        || path.starts_with("gs://")
        || path.starts_with("az://")
        || path.starts_with("azblob://")
}

/// Get a human-readable description of the cloud location
pub fn describe_cloud_location(url: &str) -> String {
    match CloudPath::parse(url) {
        Ok(path) => {
            let provider = match path.scheme.as_str() {
                "s3" => "Amazon S3",
                "gs" => "Google Cloud Storage",
                "az" | "azblob" => "Azure Blob Storage",
                _ => "Unknown Cloud",
            };
            if path.path.is_empty() {
                format!("{} bucket '{}'", provider, path.bucket)
            } else {
                format!("{} bucket '{}' at '{}'", provider, path.bucket, path.path)
            }
        }
        Err(_) => url.to_string(),
    }
}

/// Check if cloud credentials are available for the given URL
pub fn check_cloud_credentials(url: &str) -> Result<()> {
    let cloud_path = CloudPath::parse(url)
        .with_context(|| format!("Failed to parse cloud URL: {}", url))?;

    // Check for required environment variables based on provider
    match cloud_path.scheme.as_str() {
        "s3" => {
            if std::env::var("AWS_ACCESS_KEY_ID").is_err()
                || std::env::var("AWS_SECRET_ACCESS_KEY").is_err()
            {
                anyhow::bail!(
                    "AWS credentials not found. Please set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY environment variables."
                );
            }
        }
        "gs" => {
            if std::env::var("GOOGLE_APPLICATION_CREDENTIALS").is_err()
                && std::env::var("GOOGLE_SERVICE_ACCOUNT").is_err()
            {
                anyhow::bail!(
                    "Google Cloud credentials not found. Please set GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_SERVICE_ACCOUNT environment variable."
                );
            }
        }
        "az" | "azblob" => {
            if std::env::var("AZURE_STORAGE_ACCOUNT_NAME").is_err()
                || (std::env::var("AZURE_STORAGE_ACCOUNT_KEY").is_err()
                    && std::env::var("AZURE_STORAGE_SAS_TOKEN").is_err())
            {
                anyhow::bail!(
                    "Azure credentials not found. Please set AZURE_STORAGE_ACCOUNT_NAME and either AZURE_STORAGE_ACCOUNT_KEY or AZURE_STORAGE_SAS_TOKEN."
                );
            }
        }
        _ => {}
    }

    Ok(())
}

/// Adapter exposing a `RemoteBucket` to the sync engine
pub struct BucketStore {
    bucket: RemoteBucket,
}

impl BucketStore {
    /// Open a bucket by URL, with credentials from the environment
    pub fn open(url: &str) -> Result<Self> {
        let bucket = RemoteBucket::from_url(url)
            .with_context(|| format!("Failed to open bucket {}", url))?;
        Ok(Self { bucket })
    }
}

impl ferry_core::RemoteStore for BucketStore {
    fn list_keys(&self, prefix: &str) -> ferry_core::Result<HashSet<String>> {
        self.bucket
            .list_keys(prefix)
            .map_err(|e| ferry_core::Error::Enumeration(e.to_string()))
    }

    fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        cache_control: Option<&str>,
    ) -> ferry_core::Result<()> {
        self.bucket
            .put(key, bytes, cache_control)
            .map_err(|e| ferry_core::Error::Storage(e.to_string()))
    }
}

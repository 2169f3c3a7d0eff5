//! Object-store access for the identification pipeline
//!
//! Every pipeline hop reads from or writes to a tenant bucket, so the store
//! is addressed per call as `(bucket, key)`. The `BlobStore` trait is the
//! seam components are built against; production wires in [`S3BlobStore`],
//! tests wire in [`MemoryBlobStore`].

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod s3;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

pub type Result<T> = std::result::Result<T, BlobStoreError>;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("download of {bucket}/{key} failed: {message}")]
    Download {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("upload of {bucket}/{key} failed: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("local copy at {path} failed: {message}")]
    LocalCopy { path: String, message: String },
}

/// Key-addressed blob storage.
///
/// No versioning or conditional-write semantics are assumed: a get returns
/// the current bytes, a put overwrites.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Download an object and materialize it as a local file.
    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let bytes = self.download(bucket, key).await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| BlobStoreError::LocalCopy {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Upload a local file as an object.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BlobStoreError::LocalCopy {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        self.upload(bucket, key, bytes, content_type).await
    }
}

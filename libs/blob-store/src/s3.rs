//! S3 implementation of [`BlobStore`]

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::{BlobStore, BlobStoreError, Result};

/// S3-backed blob store.
///
/// The client handle is built once at process start and shared; buckets are
/// addressed per call.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a store from the ambient AWS environment configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BlobStoreError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| BlobStoreError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let bytes = body.into_bytes().to_vec();
        debug!(bucket = %bucket, key = %key, size = bytes.len(), "object downloaded");
        Ok(bytes)
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| BlobStoreError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        debug!(bucket = %bucket, key = %key, size, "object uploaded");
        Ok(())
    }
}

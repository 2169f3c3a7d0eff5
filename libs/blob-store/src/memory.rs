//! In-memory implementation of [`BlobStore`] for test harnesses

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{BlobStore, BlobStoreError, Result};

/// Mutex-guarded map keyed by `(bucket, key)`.
///
/// Upload failures can be injected with [`MemoryBlobStore::deny_uploads`] to
/// exercise error paths.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    deny_uploads: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.objects
            .lock()
            .await
            .insert((bucket.to_string(), key.to_string()), body);
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys present in one bucket, sorted.
    pub async fn keys_in(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Make every subsequent upload fail.
    pub fn deny_uploads(&self, deny: bool) {
        self.deny_uploads.store(deny, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.get(bucket, key)
            .await
            .ok_or_else(|| BlobStoreError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "no such object".to_string(),
            })
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        if self.deny_uploads.load(Ordering::SeqCst) {
            return Err(BlobStoreError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "uploads denied".to_string(),
            });
        }
        self.insert(bucket, key, body).await;
        Ok(())
    }
}

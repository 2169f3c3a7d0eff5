//! Frame-extraction invocation handler
//!
//! One storage event in, one staged frame out:
//! download video -> decode one frame -> upload to the staging bucket ->
//! fire-and-forget invoke of the recognition stage. The scratch directory
//! is purged on every exit path before the invocation completes.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use blob_store::BlobStore;
use scratch_dir::InvocationScratch;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{FrameOutput, RecognitionPayload, StorageEvent};
use crate::services::{FrameDecoder, FrameExtractor, StageInvoker};

pub struct FramePipeline {
    blob_store: Arc<dyn BlobStore>,
    extractor: FrameExtractor<dyn FrameDecoder>,
    invoker: Arc<dyn StageInvoker>,
    config: Config,
}

impl FramePipeline {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        decoder: Arc<dyn FrameDecoder>,
        invoker: Arc<dyn StageInvoker>,
        config: Config,
    ) -> Self {
        Self {
            blob_store,
            extractor: FrameExtractor::new(decoder),
            invoker,
            config,
        }
    }

    /// Process one storage event. Exactly one attempt; failures are
    /// reported, not retried.
    pub async fn handle(&self, event: &StorageEvent) -> Result<FrameOutput> {
        let started = Instant::now();
        let record = event
            .records
            .first()
            .ok_or_else(|| AppError::InvalidEvent("event contains no records".to_string()))?;
        let bucket = &record.s3.bucket.name;
        let key = &record.s3.object.key;
        info!(bucket = %bucket, key = %key, "processing video upload");

        // Pure derivation, checked before any I/O happens.
        let staging_bucket = bucket_routing::frame_stage_bucket(bucket)?;

        let mut scratch = InvocationScratch::new(&self.config.scratch_root)?;
        let result = self.run(bucket, key, &staging_bucket, &scratch).await;

        // Local storage is reused by later invocations; purge regardless of
        // outcome, and never let a purge failure override it.
        if let Err(e) = scratch.purge() {
            warn!(error = %e, "scratch purge failed");
        }

        match &result {
            Ok(output) => info!(
                bucket = %output.staging_bucket,
                key = %output.frame_key,
                duration_ms = started.elapsed().as_millis() as u64,
                "video processed"
            ),
            Err(e) => error!(bucket = %bucket, key = %key, error = %e, "video processing failed"),
        }
        result
    }

    async fn run(
        &self,
        bucket: &str,
        key: &str,
        staging_bucket: &str,
        scratch: &InvocationScratch,
    ) -> Result<FrameOutput> {
        let file_name = Path::new(key)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::InvalidEvent(format!("object key `{key}` has no file name")))?;
        let stem = Path::new(&file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::InvalidEvent(format!("object key `{key}` has no base name")))?;

        let video_path = scratch.file(&file_name);
        self.blob_store
            .download_to(bucket, key, &video_path)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        let frames_dir = scratch.subdir(&stem)?;
        let frame_path = self
            .extractor
            .extract_one_frame(&video_path, &stem, &frames_dir)
            .await?;

        let frame_key = format!("{stem}.jpg");
        self.blob_store
            .upload_file(staging_bucket, &frame_key, &frame_path, "image/jpeg")
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        info!(bucket = %staging_bucket, key = %frame_key, "frame staged");

        // Hand-off is one-way: once the frame is staged, an invoke failure
        // is logged but does not fail this invocation.
        let payload = RecognitionPayload {
            bucket_name: staging_bucket.to_string(),
            image_file_name: frame_key.clone(),
        };
        if let Err(e) = self
            .invoker
            .invoke_async(&self.config.recognition_function, &payload)
            .await
        {
            error!(
                function = %self.config.recognition_function,
                error = %e,
                "failed to invoke recognition stage"
            );
        }

        Ok(FrameOutput {
            staging_bucket: staging_bucket.to_string(),
            frame_key,
        })
    }
}

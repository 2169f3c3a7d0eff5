//! Identity-resolution invocation handler
//!
//! One staged frame in, one matched label out:
//! download frame and gallery -> decode -> embed -> nearest neighbor ->
//! upload the label as a plain-text result object. The scratch directory is
//! purged on every exit path before the invocation completes.

use std::path::Path;
use std::sync::Arc;

use image::GenericImageView;
use tracing::{debug, error, info, warn};

use blob_store::BlobStore;
use bucket_routing::RoutingContext;
use scratch_dir::InvocationScratch;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{RecognitionOutput, RecognitionRequest};
use crate::services::{FaceEmbedder, Gallery};

pub struct IdentityResolver {
    blob_store: Arc<dyn BlobStore>,
    embedder: Arc<dyn FaceEmbedder>,
    config: Config,
}

impl IdentityResolver {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        embedder: Arc<dyn FaceEmbedder>,
        config: Config,
    ) -> Self {
        Self {
            blob_store,
            embedder,
            config,
        }
    }

    /// Resolve one staged frame to an identity. Exactly one attempt;
    /// failures are reported, not retried.
    pub async fn handle(&self, request: &RecognitionRequest) -> Result<RecognitionOutput> {
        info!(
            bucket = %request.bucket_name,
            key = %request.image_file_name,
            "resolving identity"
        );

        // Pure derivation, checked before any I/O happens.
        let routing = RoutingContext::from_stage_bucket(&request.bucket_name)?;

        let mut scratch = InvocationScratch::new(&self.config.scratch_root)?;
        let result = self.run(request, &routing, &scratch).await;

        // Local storage is reused by later invocations; purge regardless of
        // outcome, and never let a purge failure override it.
        if let Err(e) = scratch.purge() {
            warn!(error = %e, "scratch purge failed");
        }

        match &result {
            Ok(output) => info!(result = %output.result, file = %output.output_file, "identity resolved"),
            Err(e) => error!(
                bucket = %request.bucket_name,
                key = %request.image_file_name,
                error = %e,
                "identity resolution failed"
            ),
        }
        result
    }

    async fn run(
        &self,
        request: &RecognitionRequest,
        routing: &RoutingContext,
        scratch: &InvocationScratch,
    ) -> Result<RecognitionOutput> {
        let image_path = scratch.file(&request.image_file_name);
        self.blob_store
            .download_to(&request.bucket_name, &request.image_file_name, &image_path)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        let gallery_path = scratch.file(&self.config.gallery_key);
        self.blob_store
            .download_to(&routing.data_bucket, &self.config.gallery_key, &gallery_path)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        let image_bytes = tokio::fs::read(&image_path)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;
        let image = image::load_from_memory(&image_bytes)
            .map_err(|e| AppError::ImageDecode(e.to_string()))?;
        debug!(width = image.width(), height = image.height(), "image decoded");

        let face = self
            .embedder
            .embed(&image_bytes)
            .await?
            .ok_or(AppError::NoFaceDetected)?;
        debug!(
            dimension = face.vector.len(),
            confidence = face.confidence,
            "face candidate embedded"
        );

        let gallery_bytes = tokio::fs::read(&gallery_path)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;
        let gallery = Gallery::from_slice(&gallery_bytes)?;
        let matched = gallery.nearest_neighbor(&face.vector)?;
        info!(
            label = %matched.label,
            distance = matched.distance,
            entries = gallery.len(),
            "nearest gallery entry selected"
        );

        let stem = Path::new(&request.image_file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "image file name `{}` has no base name",
                    request.image_file_name
                ))
            })?;
        let output_key = format!("{stem}.txt");
        let result_path = scratch.file(&output_key);
        tokio::fs::write(&result_path, matched.label.as_bytes())
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        self.blob_store
            .upload_file(&routing.output_bucket, &output_key, &result_path, "text/plain")
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        Ok(RecognitionOutput {
            message: "Face recognition completed".to_string(),
            result: matched.label,
            output_file: output_key,
        })
    }
}

use thiserror::Error;

use crate::services::embedder::EmbedderError;
use crate::services::gallery::GalleryError;

/// Result type for recognition-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures a single recognition invocation can end in.
///
/// Every variant is reported, never retried. No partial result reaches the
/// output bucket: either the full chain succeeds and exactly one result
/// object is written, or nothing is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("routing error: {0}")]
    Routing(#[from] bucket_routing::RoutingError),

    #[error("download error: {0}")]
    Download(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// The capability found no face above its internal threshold. A
    /// business outcome, not a crash.
    #[error("no face detected in image")]
    NoFaceDetected,

    #[error("embedder error: {0}")]
    Embedder(String),

    #[error("gallery error: {0}")]
    Gallery(#[from] GalleryError),

    #[error("upload error: {0}")]
    Upload(String),

    #[error("scratch storage error: {0}")]
    Scratch(#[from] scratch_dir::ScratchError),
}

impl From<EmbedderError> for AppError {
    fn from(err: EmbedderError) -> Self {
        AppError::Embedder(err.to_string())
    }
}

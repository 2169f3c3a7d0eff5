use thiserror::Error;

/// Result type for frame-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures a single frame-extraction invocation can end in.
///
/// Every variant is reported, never retried: the invocation makes one
/// attempt and surfaces the outcome to the invoking runtime.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("routing error: {0}")]
    Routing(#[from] bucket_routing::RoutingError),

    #[error("download error: {0}")]
    Download(String),

    /// The external decoder could not be run or exited non-zero. The exit
    /// code, when the process produced one, is kept for diagnostics.
    #[error("decoder failed (exit code {code:?}): {message}")]
    Decode { code: Option<i32>, message: String },

    #[error("decoder produced no frames")]
    NoFramesProduced,

    #[error("upload error: {0}")]
    Upload(String),

    #[error("scratch storage error: {0}")]
    Scratch(#[from] scratch_dir::ScratchError),
}

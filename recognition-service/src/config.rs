use std::path::PathBuf;

/// Recognition-service configuration, read once at process start.
///
/// Environment variables:
/// - `SCRATCH_DIR`: root for per-invocation working directories
///   (default: the system temp directory)
/// - `GALLERY_KEY`: object key of the identity gallery inside the tenant's
///   data bucket (default: `gallery.json`)
/// - `EMBEDDER_ENDPOINT`: model-serving endpoint that turns an image into
///   a face embedding
#[derive(Debug, Clone)]
pub struct Config {
    pub scratch_root: PathBuf,
    pub gallery_key: String,
    pub embedder_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            scratch_root: std::env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            gallery_key: std::env::var("GALLERY_KEY")
                .unwrap_or_else(|_| "gallery.json".to_string()),
            embedder_endpoint: std::env::var("EMBEDDER_ENDPOINT").unwrap_or_else(|_| {
                "http://127.0.0.1:8501/v1/models/face-embedder:predict".to_string()
            }),
        }
    }
}

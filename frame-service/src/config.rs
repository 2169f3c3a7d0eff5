use std::path::PathBuf;

/// Frame-service configuration, read once at process start.
///
/// Environment variables:
/// - `SCRATCH_DIR`: root for per-invocation working directories
///   (default: the system temp directory)
/// - `FFMPEG_PATH`: decoder binary (default: `ffmpeg` on `PATH`)
/// - `RECOGNITION_FUNCTION`: function invoked with the staged frame
///   (default: `face-recognition`)
#[derive(Debug, Clone)]
pub struct Config {
    pub scratch_root: PathBuf,
    pub ffmpeg_path: String,
    pub recognition_function: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            scratch_root: std::env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            ffmpeg_path: std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            recognition_function: std::env::var("RECOGNITION_FUNCTION")
                .unwrap_or_else(|_| "face-recognition".to_string()),
        }
    }
}

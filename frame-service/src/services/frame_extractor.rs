//! Frame extraction from uploaded videos
//!
//! The decoder is an opaque capability behind [`FrameDecoder`];
//! [`FrameExtractor`] owns the at-most-one-frame policy on top of it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, Result};

/// External decoding capability: a video in, frame files out.
#[async_trait]
pub trait FrameDecoder: Send + Sync {
    /// Verify the decoder is usable before spending time on a download-heavy
    /// invocation.
    async fn preflight(&self) -> Result<()>;

    /// Decode `video` into frame files under `out_dir`, returning their
    /// paths in sorted order.
    async fn decode_frames(&self, video: &Path, stem: &str, out_dir: &Path)
        -> Result<Vec<PathBuf>>;
}

/// ffmpeg subprocess decoder.
///
/// Sampling policy: one frame per second (`fps=1`), hard-limited to a single
/// output frame (`-frames:v 1`). Sampling first and truncating second is
/// deliberate — it stays robust to containers whose first decodable frame is
/// a key-frame artifact, where "first frame of stream" would not be.
pub struct FfmpegFrameDecoder {
    ffmpeg_path: String,
}

impl FfmpegFrameDecoder {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl FrameDecoder for FfmpegFrameDecoder {
    async fn preflight(&self) -> Result<()> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .output()
            .await
            .map_err(|e| AppError::Decode {
                code: None,
                message: format!("failed to execute {}: {e}", self.ffmpeg_path),
            })?;
        if !output.status.success() {
            return Err(AppError::Decode {
                code: output.status.code(),
                message: format!("{} -version failed", self.ffmpeg_path),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(version = %stdout.lines().next().unwrap_or_default(), "decoder available");
        Ok(())
    }

    async fn decode_frames(
        &self,
        video: &Path,
        stem: &str,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let frame_path = out_dir.join(format!("{stem}.jpg"));
        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(video)
            .args(["-vf", "fps=1", "-frames:v", "1"])
            .arg(&frame_path)
            .arg("-y")
            .output()
            .await
            .map_err(|e| AppError::Decode {
                code: None,
                message: format!("failed to execute {}: {e}", self.ffmpeg_path),
            })?;

        if !output.status.success() {
            return Err(AppError::Decode {
                code: output.status.code(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let mut frames = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await.map_err(|e| AppError::Decode {
            code: None,
            message: format!("failed to read decoder output directory: {e}"),
        })?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| AppError::Decode {
            code: None,
            message: format!("failed to read decoder output directory: {e}"),
        })? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "jpg") {
                frames.push(path);
            }
        }
        frames.sort();
        Ok(frames)
    }
}

/// Applies the one-frame policy over a decoder: a video yields exactly one
/// frame, never zero or several.
pub struct FrameExtractor<D: FrameDecoder + ?Sized> {
    decoder: std::sync::Arc<D>,
}

impl<D: FrameDecoder + ?Sized> FrameExtractor<D> {
    pub fn new(decoder: std::sync::Arc<D>) -> Self {
        Self { decoder }
    }

    pub async fn extract_one_frame(
        &self,
        video: &Path,
        stem: &str,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        self.decoder.preflight().await?;
        let frames = self.decoder.decode_frames(video, stem, out_dir).await?;
        debug!(produced = frames.len(), "decoder finished");
        frames.into_iter().next().ok_or(AppError::NoFramesProduced)
    }
}

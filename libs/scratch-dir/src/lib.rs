//! Per-invocation scoped local storage
//!
//! The local filesystem is a shared resource reused across sequential
//! invocations of the same execution context. Each invocation gets its own
//! unique directory under a configured root and must leave nothing behind:
//! `purge` removes the whole tree and is safe to call more than once, and
//! the directory is also removed on `Drop` so an unwinding invocation still
//! cleans up.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("failed to create scratch directory under {root}: {source}")]
    Create {
        root: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to purge scratch directory {path}: {source}")]
    Purge {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A unique working directory scoped to a single invocation.
pub struct InvocationScratch {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl InvocationScratch {
    pub fn new(root: &Path) -> Result<Self, ScratchError> {
        std::fs::create_dir_all(root).map_err(|e| ScratchError::Create {
            root: root.to_path_buf(),
            source: e,
        })?;
        let dir = tempfile::Builder::new()
            .prefix("invocation-")
            .tempdir_in(root)
            .map_err(|e| ScratchError::Create {
                root: root.to_path_buf(),
                source: e,
            })?;
        let path = dir.path().to_path_buf();
        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for a file directly inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Create and return a named subdirectory inside the scratch directory.
    pub fn subdir(&self, name: &str) -> Result<PathBuf, ScratchError> {
        let sub = self.path.join(name);
        std::fs::create_dir_all(&sub).map_err(|e| ScratchError::Create {
            root: sub.clone(),
            source: e,
        })?;
        Ok(sub)
    }

    /// Remove the scratch directory and everything in it.
    ///
    /// Idempotent: a second call (or a call after the directory is already
    /// gone) is a no-op.
    pub fn purge(&mut self) -> Result<(), ScratchError> {
        match self.dir.take() {
            Some(dir) => dir.close().map_err(|e| ScratchError::Purge {
                path: self.path.clone(),
                source: e,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_unique_directories_under_root() {
        let root = tempfile::tempdir().unwrap();
        let a = InvocationScratch::new(root.path()).unwrap();
        let b = InvocationScratch::new(root.path()).unwrap();
        assert!(a.path().is_dir());
        assert!(b.path().is_dir());
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn file_and_subdir_live_inside_scratch() {
        let root = tempfile::tempdir().unwrap();
        let scratch = InvocationScratch::new(root.path()).unwrap();
        let f = scratch.file("clip.mp4");
        assert_eq!(f.parent().unwrap(), scratch.path());
        let sub = scratch.subdir("frames").unwrap();
        assert!(sub.is_dir());
        assert_eq!(sub.parent().unwrap(), scratch.path());
    }

    #[test]
    fn purge_removes_everything_and_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let mut scratch = InvocationScratch::new(root.path()).unwrap();
        std::fs::write(scratch.file("residue.txt"), b"data").unwrap();
        let sub = scratch.subdir("nested").unwrap();
        std::fs::write(sub.join("more.bin"), b"data").unwrap();

        scratch.purge().unwrap();
        assert!(!scratch.path().exists());
        // Second purge is a no-op.
        scratch.purge().unwrap();
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let scratch = InvocationScratch::new(root.path()).unwrap();
            std::fs::write(scratch.file("left-behind"), b"x").unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}

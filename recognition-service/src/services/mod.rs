//! Service layer for identity resolution
//!
//! - Embedder: opaque detection + embedding capability
//! - Gallery: known identities and nearest-neighbor lookup

pub mod embedder;
pub mod gallery;

pub use embedder::{FaceEmbedder, FaceEmbedding, HttpFaceEmbedder};
pub use gallery::{Gallery, GalleryError, MatchResult};

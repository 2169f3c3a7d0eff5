//! Identity-resolution integration tests
//!
//! Exercise the stage-2 handler end to end against an in-memory blob store
//! and deterministic embedder doubles.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;

use blob_store::MemoryBlobStore;
use recognition_service::models::RecognitionRequest;
use recognition_service::services::embedder::{EmbedderError, FaceEmbedder, FaceEmbedding};
use recognition_service::services::GalleryError;
use recognition_service::{AppError, Config, IdentityResolver};

/// Embedder double returning a fixed embedding for any input.
struct FixedEmbedder {
    vector: Vec<f32>,
}

#[async_trait]
impl FaceEmbedder for FixedEmbedder {
    async fn embed(&self, _image: &[u8]) -> Result<Option<FaceEmbedding>, EmbedderError> {
        Ok(Some(FaceEmbedding {
            vector: self.vector.clone(),
            confidence: 0.99,
        }))
    }
}

/// Embedder double reporting that no face was found.
struct NoFaceEmbedder;

#[async_trait]
impl FaceEmbedder for NoFaceEmbedder {
    async fn embed(&self, _image: &[u8]) -> Result<Option<FaceEmbedding>, EmbedderError> {
        Ok(None)
    }
}

struct Harness {
    store: MemoryBlobStore,
    resolver: IdentityResolver,
    scratch_root: tempfile::TempDir,
}

fn harness(embedder: Arc<dyn FaceEmbedder>) -> Harness {
    let store = MemoryBlobStore::new();
    let scratch_root = tempfile::tempdir().unwrap();
    let config = Config {
        scratch_root: scratch_root.path().to_path_buf(),
        gallery_key: "gallery.json".to_string(),
        embedder_endpoint: "http://embedder.invalid".to_string(),
    };
    let resolver = IdentityResolver::new(Arc::new(store.clone()), embedder, config);
    Harness {
        store,
        resolver,
        scratch_root,
    }
}

/// A small valid PNG, decodable by the raster layer.
fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([128, 64, 32]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn two_person_gallery() -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "embeddings": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        "labels": ["alice", "bob"]
    }))
    .unwrap()
}

async fn seed(h: &Harness, gallery: Vec<u8>) {
    h.store.insert("u123-stage-1", "query.jpg", png_bytes()).await;
    h.store.insert("u123-data", "gallery.json", gallery).await;
}

fn request() -> RecognitionRequest {
    RecognitionRequest {
        bucket_name: "u123-stage-1".to_string(),
        image_file_name: "query.jpg".to_string(),
    }
}

fn assert_scratch_empty(root: &tempfile::TempDir) {
    let residual = std::fs::read_dir(root.path()).unwrap().count();
    assert_eq!(residual, 0, "scratch root must hold zero residual files");
}

#[tokio::test]
async fn query_nearer_the_second_entry_resolves_to_bob() {
    let h = harness(Arc::new(FixedEmbedder {
        vector: vec![0.9, 0.9, 0.9],
    }));
    seed(&h, two_person_gallery()).await;

    let output = h.resolver.handle(&request()).await.unwrap();

    assert_eq!(output.result, "bob");
    assert_eq!(output.output_file, "query.txt");
    assert_eq!(
        h.store.get("u123-output", "query.txt").await.unwrap(),
        b"bob"
    );
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let h = harness(Arc::new(FixedEmbedder {
        vector: vec![0.1, 0.0, 0.0],
    }));
    seed(&h, two_person_gallery()).await;

    let first = h.resolver.handle(&request()).await.unwrap();
    let second = h.resolver.handle(&request()).await.unwrap();

    assert_eq!(first.result, "alice");
    assert_eq!(first.result, second.result);
    assert_eq!(first.output_file, second.output_file);
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn image_without_a_face_fails_and_writes_nothing() {
    let h = harness(Arc::new(NoFaceEmbedder));
    seed(&h, two_person_gallery()).await;

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::NoFaceDetected));
    assert!(h.store.keys_in("u123-output").await.is_empty());
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn empty_gallery_fails_before_any_distance_computation() {
    let h = harness(Arc::new(FixedEmbedder {
        vector: vec![0.1, 0.0, 0.0],
    }));
    let empty = serde_json::to_vec(&serde_json::json!({
        "embeddings": [],
        "labels": []
    }))
    .unwrap();
    seed(&h, empty).await;

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::Gallery(GalleryError::Empty)));
    assert!(h.store.keys_in("u123-output").await.is_empty());
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn non_stage_bucket_fails_routing_before_any_transfer() {
    let h = harness(Arc::new(FixedEmbedder { vector: vec![0.0] }));
    seed(&h, two_person_gallery()).await;

    let err = h
        .resolver
        .handle(&RecognitionRequest {
            bucket_name: "u123-output".to_string(),
            image_file_name: "query.jpg".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Routing(_)));
    assert!(h.store.keys_in("u123-output").await.is_empty());
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn missing_gallery_object_is_a_download_error() {
    let h = harness(Arc::new(FixedEmbedder { vector: vec![0.0] }));
    h.store.insert("u123-stage-1", "query.jpg", png_bytes()).await;

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::Download(_)));
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn unreadable_image_bytes_are_an_image_decode_error() {
    let h = harness(Arc::new(FixedEmbedder { vector: vec![0.0] }));
    h.store
        .insert("u123-stage-1", "query.jpg", b"not an image".to_vec())
        .await;
    h.store
        .insert("u123-data", "gallery.json", two_person_gallery())
        .await;

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::ImageDecode(_)));
    assert!(h.store.keys_in("u123-output").await.is_empty());
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn mismatched_gallery_sequences_are_a_format_error() {
    let h = harness(Arc::new(FixedEmbedder {
        vector: vec![0.1, 0.0, 0.0],
    }));
    let skewed = serde_json::to_vec(&serde_json::json!({
        "embeddings": [[0.0, 0.0, 0.0]],
        "labels": ["alice", "bob"]
    }))
    .unwrap();
    seed(&h, skewed).await;

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::Gallery(GalleryError::Format(_))));
    assert_scratch_empty(&h.scratch_root);
}

#[tokio::test]
async fn result_upload_failure_leaves_no_partial_output() {
    let h = harness(Arc::new(FixedEmbedder {
        vector: vec![0.9, 0.9, 0.9],
    }));
    seed(&h, two_person_gallery()).await;
    h.store.deny_uploads(true);

    let err = h.resolver.handle(&request()).await.unwrap_err();

    assert!(matches!(err, AppError::Upload(_)));
    assert!(h.store.keys_in("u123-output").await.is_empty());
    assert_scratch_empty(&h.scratch_root);
}

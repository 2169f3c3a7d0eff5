//! Face detection and embedding
//!
//! Detection, alignment, and embedding run as one opaque external call. The
//! model configuration (embedding dimension, detection thresholds) must
//! match the configuration used when the gallery embeddings were generated;
//! distances against a gallery built with different settings are
//! meaningless. That coupling is an operational contract — it is not
//! cross-validated at runtime.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct EmbedderError(pub String);

/// A face isolated from an image, in identity space.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEmbedding {
    pub vector: Vec<f32>,
    /// Detection confidence of the underlying face candidate.
    pub confidence: f32,
}

/// Opaque capability mapping an image to zero or one face embeddings.
///
/// `Ok(None)` means the capability found no face above its internal
/// threshold — a normal outcome, not an error. Given the same input bytes
/// the capability returns the same embedding; there is no hidden
/// randomness.
#[async_trait]
pub trait FaceEmbedder: Send + Sync {
    async fn embed(&self, image: &[u8]) -> Result<Option<FaceEmbedding>, EmbedderError>;
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<Vec<f32>>,
    confidence: Option<f32>,
}

impl EmbedResponse {
    fn into_embedding(self) -> Option<FaceEmbedding> {
        self.embedding.map(|vector| FaceEmbedding {
            vector,
            confidence: self.confidence.unwrap_or(0.0),
        })
    }
}

/// Model-serving client for the detection+embedding capability.
///
/// Posts the raw image to the serving endpoint and reads back
/// `{"embedding": [...], "confidence": ...}`; a `null` embedding reports
/// that no face was found.
pub struct HttpFaceEmbedder {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFaceEmbedder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FaceEmbedder for HttpFaceEmbedder {
    async fn embed(&self, image: &[u8]) -> Result<Option<FaceEmbedding>, EmbedderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| EmbedderError(format!("embedder request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbedderError(format!(
                "embedder returned status {status}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbedderError(format!("invalid embedder response: {e}")))?;
        let embedding = parsed.into_embedding();
        match &embedding {
            Some(e) => debug!(
                dimension = e.vector.len(),
                confidence = e.confidence,
                "face embedded"
            ),
            None => debug!("no face above detection threshold"),
        }
        Ok(embedding)
    }
}

//! Identity gallery and nearest-neighbor lookup
//!
//! The gallery is the serialized output of a separate enrollment process:
//! two parallel sequences, embeddings and labels, where index `i` in each
//! describes one identity sample. It is loaded once per invocation and
//! never mutated here.
//!
//! Lookup is a linear scan over all entries under Euclidean distance.
//! Galleries are small enough that an O(n) scan per query is acceptable;
//! that is a deliberate scalability ceiling, and no index structure is
//! maintained. The nearest entry always wins — there is no distance
//! threshold below which a match is rejected.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("gallery contains no entries")]
    Empty,

    #[error("gallery format error: {0}")]
    Format(String),
}

/// The nearest gallery entry to a query embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub label: String,
    pub distance: f32,
}

#[derive(Debug, Deserialize)]
struct GalleryFile {
    embeddings: Vec<Vec<f32>>,
    labels: Vec<String>,
}

/// Known identity samples, in enrollment order.
#[derive(Debug)]
pub struct Gallery {
    embeddings: Vec<Vec<f32>>,
    labels: Vec<String>,
}

impl Gallery {
    /// Deserialize a persisted gallery.
    ///
    /// The serialized form is an external contract with the enrollment
    /// process: `{"embeddings": [[..], ..], "labels": ["..", ..]}`, with
    /// the two sequences the same length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GalleryError> {
        let file: GalleryFile =
            serde_json::from_slice(bytes).map_err(|e| GalleryError::Format(e.to_string()))?;
        if file.embeddings.len() != file.labels.len() {
            return Err(GalleryError::Format(format!(
                "{} embeddings but {} labels",
                file.embeddings.len(),
                file.labels.len()
            )));
        }
        Ok(Self {
            embeddings: file.embeddings,
            labels: file.labels,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Find the entry with minimal Euclidean distance to `query`.
    ///
    /// Exact ties go to the entry enrolled first (lowest index), so
    /// repeated runs over identical inputs always produce the same match.
    pub fn nearest_neighbor(&self, query: &[f32]) -> Result<MatchResult, GalleryError> {
        if self.is_empty() {
            return Err(GalleryError::Empty);
        }

        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;
        for (index, entry) in self.embeddings.iter().enumerate() {
            let distance = euclidean_distance(query, entry);
            if distance < best_distance {
                best_index = index;
                best_distance = distance;
            }
        }

        Ok(MatchResult {
            label: self.labels[best_index].clone(),
            distance: best_distance,
        })
    }
}

/// Euclidean (L2) distance.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

//! Per-document vector indexes over concept texts.
//!
//! One index per document, built once and never mutated. Similarity scores
//! reported to callers are `max(0, 1 - distance)` where distance is cosine
//! distance, so they land in `[0, 1]` regardless of backend.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::IndexError;

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::concept::Concept;
use crate::embedding::ConceptEmbedder;

/// Capability seam over the backing nearest-neighbor structure.
///
/// The engine only ever builds once and queries many times, so the trait has
/// no mutation surface. Implementations must be deterministic: equal inputs
/// produce equal orderings, with ties broken by insertion offset.
pub trait NearestNeighbors: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `k` `(entry offset, cosine distance)` pairs, closest
    /// first.
    fn nearest(&self, query: &[f32], k: usize) -> Vec<(usize, f32)>;
}

/// Exact brute-force scan over stored vectors.
///
/// A document's concept list tops out in the tens of entries, and the scoring
/// thresholds rely on exact similarities, so a linear scan is the backend.
pub struct ExactScanBackend {
    vectors: Vec<Arc<Vec<f32>>>,
}

impl ExactScanBackend {
    pub fn new(vectors: Vec<Arc<Vec<f32>>>) -> Self {
        Self { vectors }
    }
}

impl NearestNeighbors for ExactScanBackend {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn nearest(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(offset, vector)| (offset, 1.0 - cosine_similarity(query, vector)))
            .collect();

        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored
    }
}

/// Computes cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths, empty vectors, or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// A neighbor returned by [`ConceptIndex::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNeighbor {
    /// Canonical concept text stored at build time.
    pub text: String,
    /// Similarity in `[0, 1]`, higher is closer.
    pub similarity: f32,
}

/// Immutable vector index over one document's concepts.
pub struct ConceptIndex {
    texts: Vec<String>,
    backend: Box<dyn NearestNeighbors>,
    embedder: Arc<ConceptEmbedder>,
}

impl ConceptIndex {
    /// Embeds every concept's canonical text and builds the index.
    ///
    /// Entry order follows `concepts` order exactly; queries report ties in
    /// that order.
    pub async fn build(
        concepts: &[Concept],
        embedder: Arc<ConceptEmbedder>,
    ) -> Result<Self, IndexError> {
        if concepts.is_empty() {
            return Err(IndexError::EmptyInput);
        }

        let texts: Vec<String> = concepts.iter().map(|c| c.embed_key()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        debug!(entries = texts.len(), "Concept index built");

        Ok(Self {
            texts,
            backend: Box::new(ExactScanBackend::new(vectors)),
            embedder,
        })
    }

    /// Embeds `text` and returns its `k` nearest stored concepts.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredNeighbor>, IndexError> {
        let query = self.embedder.embed(text).await?;
        let neighbors = self.backend.nearest(&query, k);

        Ok(neighbors
            .into_iter()
            .map(|(offset, distance)| ScoredNeighbor {
                text: self.texts[offset].clone(),
                similarity: (1.0 - distance).clamp(0.0, 1.0),
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Stored canonical texts in insertion order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}

impl std::fmt::Debug for ConceptIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptIndex")
            .field("entries", &self.texts.len())
            .finish()
    }
}

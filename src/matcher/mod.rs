//! Cross-document concept matching.
//!
//! The matcher owns one immutable index per document: one for the analyzed
//! source, one per retrieved candidate. `match_all` queries every candidate
//! index with every source concept and keeps the neighbors that clear the
//! similarity threshold.
//!
//! Output order is fully deterministic: candidates in insertion order,
//! matches per candidate sorted by similarity descending with stable ties.

pub mod error;
mod types;


pub use error::MatchError;
pub use types::{CandidateMatches, ConceptMatch, MatchStrength, SectionTag};

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::concept::Concept;
use crate::constants::DEFAULT_SIMILARITY_THRESHOLD;
use crate::embedding::ConceptEmbedder;
use crate::index::ConceptIndex;

/// Neighbors requested per source concept per candidate index.
pub const NEIGHBORS_PER_CONCEPT: usize = 8;

/// Matches kept per candidate after ranking.
pub const MAX_MATCHES_PER_CANDIDATE: usize = 10;

#[derive(Debug, Clone)]
/// Configuration for [`CrossDocumentMatcher`].
pub struct MatcherConfig {
    /// Minimum similarity for a neighbor to become a match.
    pub similarity_threshold: f32,
    /// Neighbors requested per source concept.
    pub neighbors_per_concept: usize,
    /// Matches kept per candidate, highest similarity first.
    pub max_matches_per_candidate: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            neighbors_per_concept: NEIGHBORS_PER_CONCEPT,
            max_matches_per_candidate: MAX_MATCHES_PER_CANDIDATE,
        }
    }
}

impl MatcherConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}

/// Matches one source document against a set of candidate documents.
pub struct CrossDocumentMatcher {
    config: MatcherConfig,
    embedder: Arc<ConceptEmbedder>,
    source: Option<ConceptIndex>,
    candidates: Vec<(String, ConceptIndex)>,
}

impl CrossDocumentMatcher {
    pub fn new(embedder: Arc<ConceptEmbedder>, config: MatcherConfig) -> Self {
        Self {
            config,
            embedder,
            source: None,
            candidates: Vec::new(),
        }
    }

    /// Builds the source index. An empty concept set is skipped rather than
    /// indexed, leaving the matcher without a source.
    pub async fn index_source(&mut self, concepts: &[Concept]) -> Result<(), MatchError> {
        if concepts.is_empty() {
            debug!("Source has no concepts, skipping index build");
            return Ok(());
        }

        self.source = Some(ConceptIndex::build(concepts, self.embedder.clone()).await?);
        Ok(())
    }

    /// Builds and registers one candidate index. Candidates with no concepts
    /// are skipped and never appear in `match_all` output.
    pub async fn index_candidate(
        &mut self,
        url: &str,
        concepts: &[Concept],
    ) -> Result<(), MatchError> {
        if concepts.is_empty() {
            debug!(url, "Candidate has no concepts, skipping index build");
            return Ok(());
        }

        let index = ConceptIndex::build(concepts, self.embedder.clone()).await?;
        self.candidates.push((url.to_string(), index));
        Ok(())
    }

    pub fn has_source_index(&self) -> bool {
        self.source.is_some()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Matches the source against every registered candidate.
    ///
    /// Errors with [`MatchError::SourceNotIndexed`] if the source index was
    /// never built. Candidates appear in registration order.
    #[instrument(skip(self), fields(candidates = self.candidates.len()))]
    pub async fn match_all(&self) -> Result<Vec<CandidateMatches>, MatchError> {
        let source = self.source.as_ref().ok_or(MatchError::SourceNotIndexed)?;

        let mut results = Vec::with_capacity(self.candidates.len());
        for (url, index) in &self.candidates {
            let matches = self.match_candidate(source, index).await?;
            debug!(url, matches = matches.len(), "Candidate matched");
            results.push(CandidateMatches {
                url: url.clone(),
                matches,
            });
        }
        Ok(results)
    }

    async fn match_candidate(
        &self,
        source: &ConceptIndex,
        candidate: &ConceptIndex,
    ) -> Result<Vec<ConceptMatch>, MatchError> {
        let mut matches = Vec::new();

        for source_text in source.texts() {
            let neighbors = candidate
                .query(source_text, self.config.neighbors_per_concept)
                .await?;

            for neighbor in neighbors {
                if neighbor.similarity < self.config.similarity_threshold {
                    continue;
                }

                let similarity = round3(neighbor.similarity);
                matches.push(ConceptMatch {
                    source_concept: source_text.clone(),
                    candidate_concept: neighbor.text,
                    similarity,
                    section: SectionTag::from_source_text(source_text),
                    strength: MatchStrength::classify(similarity),
                });
            }
        }

        // Stable sort keeps source insertion order among equal similarities.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(self.config.max_matches_per_candidate);
        Ok(matches)
    }
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

//! Concept extraction orchestration.
//!
//! Source documents get the full treatment: service-extracted records plus
//! local equation/figure/table capture, merged, deduplicated, and ranked.
//! Candidate documents only ever expose a snippet, so they go through a
//! lighter service-only path with a tighter cap.

pub mod multimodal;

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::concept::{Concept, ConceptKind, PaperSection};
use crate::constants::MAX_CONCEPTS_PER_DOCUMENT;
use crate::textgen::TextGeneration;

/// Cap on concepts extracted from a candidate snippet.
const CANDIDATE_CONCEPT_LIMIT: usize = 12;

const FALLBACK_SECTION_MIN_CHARS: usize = 200;
const FALLBACK_DESCRIPTION_CHARS: usize = 160;
const FALLBACK_CONFIDENCE: f32 = 0.4;

/// Turns document text into ranked, validated [`Concept`] lists.
pub struct ConceptExtractor {
    service: Arc<dyn TextGeneration>,
    max_concepts: usize,
}

impl ConceptExtractor {
    pub fn new(service: Arc<dyn TextGeneration>) -> Self {
        Self::with_max_concepts(service, MAX_CONCEPTS_PER_DOCUMENT)
    }

    pub fn with_max_concepts(service: Arc<dyn TextGeneration>, max_concepts: usize) -> Self {
        Self {
            service,
            max_concepts,
        }
    }

    pub fn max_concepts(&self) -> usize {
        self.max_concepts
    }

    /// Extracts the source document's concepts.
    ///
    /// Service records are validated and merged with locally captured
    /// equations, figures, and tables, then deduplicated, ranked by
    /// confidence, and capped. A failing service degrades to local capture
    /// only; it never fails the analysis.
    pub async fn extract_source(&self, sections: &[PaperSection]) -> Vec<Concept> {
        let mut concepts = self.validated_records(sections).await;

        let joined = sections
            .iter()
            .map(|section| section.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        concepts.extend(multimodal::extract_equations(&joined));
        concepts.extend(multimodal::extract_figures_tables(&joined));

        let ranked = dedup_rank_cap(concepts, self.max_concepts);
        debug!(concepts = ranked.len(), "Source concept extraction complete");
        ranked
    }

    /// Extracts concepts from a candidate's snippet text.
    pub async fn extract_candidate(&self, snippet: &str) -> Vec<Concept> {
        if snippet.trim().is_empty() {
            return Vec::new();
        }
        let section = PaperSection::new("snippet", snippet);
        let concepts = self.validated_records(std::slice::from_ref(&section)).await;
        dedup_rank_cap(concepts, CANDIDATE_CONCEPT_LIMIT)
    }

    async fn validated_records(&self, sections: &[PaperSection]) -> Vec<Concept> {
        let records = match self.service.extract_concepts(sections).await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "Concept extraction service failed, continuing with local capture only");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .take(self.max_concepts)
            .filter_map(|record| match record.validate() {
                Ok(concept) => Some(concept),
                Err(error) => {
                    debug!(%error, "Dropping invalid concept record");
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for ConceptExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptExtractor")
            .field("max_concepts", &self.max_concepts)
            .finish_non_exhaustive()
    }
}

/// Deduplicates by [`Concept::dedup_key`] keeping the highest confidence per
/// key, ranks by confidence descending (stable, so equal confidences keep
/// first-seen order), and caps the result.
pub fn dedup_rank_cap(concepts: Vec<Concept>, cap: usize) -> Vec<Concept> {
    let mut deduped: Vec<(String, Concept)> = Vec::new();
    for concept in concepts {
        let key = concept.dedup_key();
        match deduped.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => {
                if concept.confidence > existing.confidence {
                    *existing = concept;
                }
            }
            None => deduped.push((key, concept)),
        }
    }

    let mut ranked: Vec<Concept> = deduped.into_iter().map(|(_, concept)| concept).collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(cap);
    ranked
}

/// Synthesizes one low-confidence overview concept per substantial section
/// until `existing` plus the synthesized count reaches `minimum` or sections
/// run out. Keeps the matching stage supplied with signal when extraction
/// comes back sparse.
pub fn fallback_concepts(
    sections: &[PaperSection],
    existing: usize,
    minimum: usize,
) -> Vec<Concept> {
    let mut synthesized = Vec::new();
    for section in sections {
        if existing + synthesized.len() >= minimum {
            break;
        }
        if section.content.chars().count() <= FALLBACK_SECTION_MIN_CHARS {
            continue;
        }

        let description = section
            .content
            .chars()
            .take(FALLBACK_DESCRIPTION_CHARS)
            .collect::<String>()
            .trim()
            .to_string();
        if let Ok(concept) = Concept::new(
            format!("{} overview", section.name),
            ConceptKind::Domain,
            description,
            section.name.clone(),
            FALLBACK_CONFIDENCE,
        ) {
            synthesized.push(concept);
        }
    }

    if !synthesized.is_empty() {
        debug!(
            synthesized = synthesized.len(),
            "Synthesized fallback concepts for sparse extraction"
        );
    }
    synthesized
}

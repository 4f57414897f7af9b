//! Core document model: concepts, paper structure, and retrieved candidates.
//!
//! A [`Concept`] is the unit of comparison for the whole engine. Everything
//! downstream (indexing, matching, scoring) operates on the canonical text a
//! concept renders to, so the exact formatting of [`Concept::embed_key`] is
//! part of the engine's contract and must stay stable across releases.

pub mod error;
pub mod record;

#[cfg(test)]
mod tests;

pub use error::ConceptError;
pub use record::RawConceptRecord;

use serde::{Deserialize, Serialize};

/// Classification of an extracted concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptKind {
    Algorithm,
    Technique,
    Domain,
    Metric,
    Dataset,
    Equation,
    Figure,
    Citation,
    Table,
}

impl ConceptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Algorithm => "algorithm",
            Self::Technique => "technique",
            Self::Domain => "domain",
            Self::Metric => "metric",
            Self::Dataset => "dataset",
            Self::Equation => "equation",
            Self::Figure => "figure",
            Self::Citation => "citation",
            Self::Table => "table",
        }
    }

    /// Parses a kind from loosely formatted generator output.
    ///
    /// Accepts any casing and surrounding whitespace; returns `None` for
    /// values outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "algorithm" => Some(Self::Algorithm),
            "technique" => Some(Self::Technique),
            "domain" => Some(Self::Domain),
            "metric" => Some(Self::Metric),
            "dataset" => Some(Self::Dataset),
            "equation" => Some(Self::Equation),
            "figure" => Some(Self::Figure),
            "citation" => Some(Self::Citation),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted idea from a document.
///
/// Construct via [`Concept::new`] or [`RawConceptRecord::validate`]; both
/// reject empty names and out-of-range confidences so invalid records cannot
/// enter the matching path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConceptKind,
    pub description: String,
    pub section: String,
    pub confidence: f32,
}

impl Concept {
    pub fn new(
        name: impl Into<String>,
        kind: ConceptKind,
        description: impl Into<String>,
        section: impl Into<String>,
        confidence: f32,
    ) -> Result<Self, ConceptError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConceptError::EmptyName);
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ConceptError::ConfidenceOutOfRange { value: confidence });
        }
        Ok(Self {
            name,
            kind,
            description: description.into(),
            section: section.into(),
            confidence,
        })
    }

    /// Identity key for deduplication: same lowercased name and kind means
    /// the same concept regardless of description differences.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.name.to_lowercase(), self.kind)
    }

    /// Canonical text embedded and stored in indexes.
    ///
    /// Stable format; two concepts with equal fields always render the same
    /// key, which is what makes cross-document similarity meaningful.
    pub fn embed_key(&self) -> String {
        format!(
            "{} | {} | section:{} | type:{}",
            self.name, self.description, self.section, self.kind
        )
    }
}

/// A named section of a parsed paper with its extracted concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSection {
    pub name: String,
    pub content: String,
    pub word_count: usize,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

impl PaperSection {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        Self {
            name: name.into(),
            content,
            word_count,
            concepts: Vec::new(),
        }
    }
}

/// Structured form of the analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperStructure {
    pub title: String,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    pub sections: Vec<PaperSection>,
    pub total_concepts: usize,
}

impl PaperStructure {
    pub fn new(title: impl Into<String>, sections: Vec<PaperSection>) -> Self {
        Self {
            title: title.into(),
            authors: None,
            sections,
            total_concepts: 0,
        }
    }

    /// First section in document order, used as the abstract surrogate when
    /// building search queries.
    pub fn first_section(&self) -> Option<&PaperSection> {
        self.sections.first()
    }

    pub fn section(&self, name: &str) -> Option<&PaperSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Files each concept into the section it was extracted from and updates
    /// the total count. Concepts naming an unknown section are still counted.
    pub fn assign_concepts(&mut self, concepts: &[Concept]) {
        for section in &mut self.sections {
            section.concepts.clear();
        }
        for concept in concepts {
            if let Some(section) = self
                .sections
                .iter_mut()
                .find(|s| s.name == concept.section)
            {
                section.concepts.push(concept.clone());
            }
        }
        self.total_concepts = concepts.len();
    }
}

/// A document retrieved from an external corpus, compared against the
/// analyzed paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub title: String,
    pub url: String,
    /// Provider that produced this candidate, e.g. `"arxiv"`.
    pub source: String,
    pub snippet: String,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub publication_year: Option<i32>,
}

impl CandidateDocument {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            snippet: snippet.into(),
            concepts: Vec::new(),
            publication_year: None,
        }
    }
}

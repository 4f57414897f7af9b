use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, METHODOLOGY_WEIGHT, STRONG_MATCH_THRESHOLD};

/// Coarse section classification of a match's source concept.
///
/// Methodology matches carry a heavier weight in scoring, see
/// [`SectionTag::weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionTag {
    Methodology,
    Other,
}

impl SectionTag {
    /// Tags from the source concept's canonical text. Any mention of
    /// "method" or "algorithm" in any casing counts as methodology.
    pub fn from_source_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("method") || lower.contains("algorithm") {
            Self::Methodology
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Methodology => "methodology",
            Self::Other => "other",
        }
    }

    /// Scoring weight for matches in this section.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Methodology => METHODOLOGY_WEIGHT,
            Self::Other => 1.0,
        }
    }
}

impl std::fmt::Display for SectionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative strength band of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrength {
    Weak,
    Medium,
    Strong,
}

impl MatchStrength {
    /// Bands are fixed, not tied to the configured threshold: lowering the
    /// threshold below 0.75 admits matches that classify as weak.
    pub fn classify(similarity: f32) -> Self {
        if similarity > STRONG_MATCH_THRESHOLD {
            Self::Strong
        } else if similarity > DEFAULT_SIMILARITY_THRESHOLD {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cross-document concept match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMatch {
    /// Canonical text of the concept in the analyzed document.
    pub source_concept: String,
    /// Canonical text of the matched concept in the candidate document.
    pub candidate_concept: String,
    /// Similarity in `[0, 1]`, rounded to three decimals.
    pub similarity: f32,
    pub section: SectionTag,
    pub strength: MatchStrength,
}

impl ConceptMatch {
    /// Similarity scaled by the section weight; may exceed 1.0 for
    /// methodology matches.
    pub fn weighted_similarity(&self) -> f32 {
        self.similarity * self.section.weight()
    }

    /// High-risk means the raw similarity clears the strong threshold,
    /// before any section weighting.
    pub fn is_high_risk(&self) -> bool {
        self.similarity > STRONG_MATCH_THRESHOLD
    }
}

/// All matches against a single candidate document, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatches {
    /// Candidate URL, the identity used across matching, scoring and
    /// reporting.
    pub url: String,
    pub matches: Vec<ConceptMatch>,
}

//! Immutable stage-output records.
//!
//! Each stage consumes the previous record by value and produces the next,
//! so a later stage cannot reach back and mutate what an earlier one
//! established, and a partially processed analysis can never escape a stage
//! boundary.

use crate::concept::{CandidateDocument, Concept, PaperStructure};
use crate::matcher::CandidateMatches;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Search,
    Extract,
    Match,
    Score,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Search => "search",
            Self::Extract => "extract",
            Self::Match => "match",
            Self::Score => "score",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse output: the structured document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStage {
    pub structure: PaperStructure,
}

impl ParsedStage {
    pub fn new(structure: PaperStructure) -> Self {
        Self { structure }
    }

    pub fn into_searched(self, candidates: Vec<CandidateDocument>) -> SearchedStage {
        SearchedStage {
            structure: self.structure,
            candidates,
        }
    }
}

/// Search output: the structure plus deduplicated retrieved candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchedStage {
    pub structure: PaperStructure,
    pub candidates: Vec<CandidateDocument>,
}

impl SearchedStage {
    /// Attaches extracted concepts. Source concepts are filed into their
    /// sections; `candidate_concepts` must be in candidate order.
    pub fn into_extracted(
        mut self,
        source_concepts: Vec<Concept>,
        candidate_concepts: Vec<Vec<Concept>>,
    ) -> ExtractedStage {
        self.structure.assign_concepts(&source_concepts);
        for (candidate, concepts) in self.candidates.iter_mut().zip(candidate_concepts) {
            candidate.concepts = concepts;
        }
        ExtractedStage {
            structure: self.structure,
            source_concepts,
            candidates: self.candidates,
        }
    }
}

/// Extract output: every document carries its concepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedStage {
    pub structure: PaperStructure,
    pub source_concepts: Vec<Concept>,
    pub candidates: Vec<CandidateDocument>,
}

impl ExtractedStage {
    /// Attaches match results. Source concepts are dropped here; scoring and
    /// report assembly only ever see match evidence.
    pub fn into_matched(self, matches: Vec<CandidateMatches>) -> MatchedStage {
        MatchedStage {
            structure: self.structure,
            candidates: self.candidates,
            matches,
        }
    }
}

/// Match output, ready for scoring and report assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedStage {
    pub structure: PaperStructure,
    pub candidates: Vec<CandidateDocument>,
    pub matches: Vec<CandidateMatches>,
}

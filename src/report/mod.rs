//! Final report types and candidate summary assembly.
//!
//! The report is the engine's single client-facing artifact. Field names and
//! serialization shapes are part of the API contract; changing them breaks
//! downstream consumers, so tests pin the JSON layout explicitly.


use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::concept::CandidateDocument;
use crate::explain::ExplainabilitySummary;
use crate::matcher::CandidateMatches;
use crate::scoring::{AggregateScores, RiskAssessment};

/// Concept pairings surfaced per candidate summary.
pub const SUMMARY_MATCH_LIMIT: usize = 8;

/// Fixed until temporal weighting ships; kept in the payload so clients can
/// already bind the field.
pub const TEMPORAL_RISK_MULTIPLIER: f32 = 1.0;

const UNTITLED_CANDIDATE: &str = "Untitled";
const UNKNOWN_SOURCE: &str = "web";

/// One matched source/candidate concept pair with its raw similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub source: String,
    pub candidate: String,
    pub score: f32,
}

/// Per-candidate slice of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub title: String,
    pub url: String,
    pub source: String,
    pub overlap_pct: f32,
    /// Matches whose raw similarity clears the strong threshold.
    pub core_concepts_overlap: usize,
    pub matching_concepts: Vec<MatchPair>,
    pub publication_year: Option<i32>,
}

/// The complete analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub submitted_paper_title: String,
    pub total_internet_papers_analyzed: usize,
    pub top_similar_papers: Vec<CandidateSummary>,
    pub overall_overlap_pct: Option<f32>,
    pub overall_plagiarism_risk: RiskAssessment,
    pub novelty_score: Option<f32>,
    pub temporal_risk_multiplier: f32,
    pub explainability: ExplainabilitySummary,
    pub recommendations: Vec<String>,
    pub detailed_report: String,
    /// RFC 3339 UTC timestamp of report assembly.
    pub processed_at: String,
}

/// Builds the ranked candidate summary list.
///
/// Every matched candidate appears, including those whose matches all fell
/// below the scoring threshold; such candidates carry an overlap of zero
/// while staying out of the aggregate mean. Ranked by overlap descending;
/// the stable sort keeps retrieval order on ties.
pub fn build_candidate_summaries(
    candidates: &[CandidateDocument],
    all_matches: &[CandidateMatches],
    scores: &AggregateScores,
) -> Vec<CandidateSummary> {
    let mut summaries: Vec<CandidateSummary> = all_matches
        .iter()
        .map(|candidate_matches| {
            let document = candidates
                .iter()
                .find(|doc| doc.url == candidate_matches.url);
            let overlap_pct = scores
                .breakdown
                .iter()
                .find(|entry| entry.url == candidate_matches.url)
                .map(|entry| entry.score.overlap_percentage)
                .unwrap_or(0.0);

            CandidateSummary {
                title: document
                    .map(|doc| doc.title.clone())
                    .unwrap_or_else(|| UNTITLED_CANDIDATE.to_string()),
                url: candidate_matches.url.clone(),
                source: document
                    .map(|doc| doc.source.clone())
                    .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                overlap_pct,
                core_concepts_overlap: candidate_matches
                    .matches
                    .iter()
                    .filter(|m| m.is_high_risk())
                    .count(),
                matching_concepts: candidate_matches
                    .matches
                    .iter()
                    .take(SUMMARY_MATCH_LIMIT)
                    .map(|m| MatchPair {
                        source: m.source_concept.clone(),
                        candidate: m.candidate_concept.clone(),
                        score: m.similarity,
                    })
                    .collect(),
                publication_year: document.and_then(|doc| doc.publication_year),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.overlap_pct
            .partial_cmp(&a.overlap_pct)
            .unwrap_or(Ordering::Equal)
    });
    summaries
}

/// Renders the human-readable digest block of the report.
pub fn render_digest(
    candidates_analyzed: usize,
    contributing_phrases: usize,
    scores: &AggregateScores,
) -> String {
    let overlap = scores
        .overall_overlap_pct
        .map_or_else(|| "unknown".to_string(), |value| format!("{value:.1}%"));
    let novelty = scores
        .novelty_score
        .map_or_else(|| "unknown".to_string(), |value| format!("{value:.1}%"));
    format!(
        "Analyzed against {candidates_analyzed} research papers from arXiv and Semantic Scholar.\n\
         Found {contributing_phrases} concept matches with avg similarity {overlap}.\n\
         Novelty score: {novelty} ({} risk).",
        scores.risk_assessment
    )
}

use tracing::{debug, info};

use crate::matcher::{CandidateMatches, ConceptMatch};

use super::types::{
    AggregateScores, CandidateBreakdown, CandidateScore, RiskAssessment, RiskCategory,
};

/// Turns ranked match lists into overlap percentages and risk verdicts.
///
/// Pure arithmetic over its inputs; equal inputs always produce equal
/// scores.
#[derive(Debug, Default)]
pub struct AggregateScorer;

impl AggregateScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores one candidate's matches.
    ///
    /// Returns `None` for an empty match list; the candidate is excluded
    /// from aggregation instead of dragging the mean toward zero.
    pub fn score_candidate(&self, matches: &[ConceptMatch]) -> Option<CandidateScore> {
        if matches.is_empty() {
            return None;
        }

        let weighted_sum: f32 = matches.iter().map(ConceptMatch::weighted_similarity).sum();
        let weighted_mean = weighted_sum / matches.len() as f32;

        let high_risk_matches = matches.iter().filter(|m| m.is_high_risk()).count();

        Some(CandidateScore {
            overlap_percentage: round1(weighted_mean * 100.0),
            high_risk_matches,
            total_matches: matches.len(),
            risk_category: RiskCategory::from_weighted_mean(weighted_mean),
        })
    }

    /// Aggregates all candidates into the document-level verdict.
    ///
    /// Breakdown entries preserve candidate order. An all-excluded input
    /// yields the unknown sentinel rather than a 0% overlap claim.
    pub fn aggregate(&self, all_matches: &[CandidateMatches]) -> AggregateScores {
        let mut breakdown = Vec::new();
        let mut total_high_risk = 0usize;

        for candidate in all_matches {
            match self.score_candidate(&candidate.matches) {
                Some(score) => {
                    total_high_risk += score.high_risk_matches;
                    breakdown.push(CandidateBreakdown {
                        url: candidate.url.clone(),
                        score,
                    });
                }
                None => {
                    debug!(url = %candidate.url, "Candidate has no qualifying matches, excluded");
                }
            }
        }

        if breakdown.is_empty() {
            info!("No qualifying matches across any candidate, verdict is unknown");
            return AggregateScores::unknown();
        }

        let overall = round1(
            breakdown
                .iter()
                .map(|b| b.score.overlap_percentage)
                .sum::<f32>()
                / breakdown.len() as f32,
        );
        let novelty = round1((100.0 - overall).max(0.0));
        let risk = RiskAssessment::from_overall_overlap(overall);

        info!(
            overall_overlap_pct = overall,
            novelty_score = novelty,
            risk = %risk,
            candidates_scored = breakdown.len(),
            "Aggregate scores computed"
        );

        AggregateScores {
            overall_overlap_pct: Some(overall),
            novelty_score: Some(novelty),
            risk_assessment: risk,
            total_high_risk_matches: total_high_risk,
            candidates_scored: breakdown.len(),
            breakdown,
        }
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

//! Overlap scoring and risk aggregation.
//!
//! Scores come in two layers. Per candidate: the weighted mean of match
//! similarities becomes an overlap percentage and a risk category. Across
//! candidates: the mean of per-candidate overlaps becomes the overall
//! overlap, its complement the novelty score, and a banded risk verdict.
//!
//! # Weighting
//!
//! Methodology matches are weighted 1.5x before averaging and the result is
//! not renormalized, so a candidate's overlap percentage can exceed 100
//! (bounded by 150). Consumers clamp only the novelty complement, never the
//! overlap itself.
//!
//! Candidates with zero qualifying matches are excluded from aggregation
//! rather than averaged in as zeros. If every candidate is excluded the
//! aggregate is unknown, not 0% overlap.

pub mod scorer;
pub mod types;


pub use scorer::AggregateScorer;
pub use types::{
    AggregateScores, CandidateBreakdown, CandidateScore, RiskAssessment, RiskCategory,
};

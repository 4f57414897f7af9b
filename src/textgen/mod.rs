//! Text generation seam for concept extraction and recommendations.
//!
//! Both operations that need a language model go through the
//! [`TextGeneration`] trait: pulling structured concept records out of paper
//! sections and turning match evidence into reviewer-style recommendations.
//! [`GenaiTextService`] is the production implementation;
//! [`HeuristicTextService`] keeps the pipeline usable with no model
//! configured.

pub mod error;
pub mod heuristic;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use error::TextGenError;
pub use heuristic::HeuristicTextService;
pub use llm::GenaiTextService;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTextService;

use crate::concept::{PaperSection, RawConceptRecord};
use crate::matcher::ConceptMatch;

/// Advisory returned in place of recommendations when no match evidence
/// exists to ground them.
pub const NO_EVIDENCE_ADVISORY: &str = "No reliable recommendations can be generated because no \
     related research papers were retrieved. Please expand the search corpus or refine the query.";

/// Advisory returned when the generation provider fails or produces nothing
/// usable.
pub const DEGRADED_GENERATION_NOTICE: &str = "Recommendation generation was unavailable for this \
     analysis; review the matched concepts and overlap scores directly.";

/// Generation operations the analysis pipeline depends on.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Extracts loosely typed concept records from paper sections.
    async fn extract_concepts(
        &self,
        sections: &[PaperSection],
    ) -> Result<Vec<RawConceptRecord>, TextGenError>;

    /// Produces improvement recommendations from the strongest matches and
    /// the computed novelty score.
    async fn generate_recommendations(
        &self,
        sample: &[ConceptMatch],
        novelty_score: f32,
    ) -> Result<Vec<String>, TextGenError>;
}

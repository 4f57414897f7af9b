//! Explainability payload for human review of a match set.
//!
//! Condenses the full cross-document match list into a bounded list of
//! contributing phrases with their similarity weights, so a reviewer can
//! see at a glance which concepts drove the overlap verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matcher::ConceptMatch;


/// How many matches feed the summary.
pub const TOP_CONTRIBUTING_MATCHES: usize = 10;

/// Phrase truncation length in characters.
pub const PHRASE_CHAR_LIMIT: usize = 80;

/// A match annotated by an optional post-filter review.
///
/// The matcher itself never produces false positives by its own judgment;
/// the flag exists for a downstream reviewer to mark matches that should
/// be discounted without rewriting the match list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewedMatch {
    pub inner: ConceptMatch,
    pub false_positive: bool,
}

impl From<ConceptMatch> for ReviewedMatch {
    fn from(inner: ConceptMatch) -> Self {
        Self {
            inner,
            false_positive: false,
        }
    }
}

/// The explainability block of an analysis report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilitySummary {
    /// Truncated source-concept phrases, in match order. Duplicate text is
    /// kept; the weight keys disambiguate.
    pub top_contributing_phrases: Vec<String>,
    /// Similarity per phrase, keyed `"{ordinal}_{phrase}"` so two matches
    /// with identical truncated text cannot overwrite each other.
    pub attention_weights: BTreeMap<String, f32>,
    /// False-positive flags seen among the summarized matches.
    pub false_positives_filtered: usize,
}

/// Builds the summary from the flattened match list.
///
/// Considers only the first [`TOP_CONTRIBUTING_MATCHES`] entries. Entries
/// whose phrase trims to nothing are skipped entirely, including their
/// false-positive flag. Empty input yields the empty summary, never an
/// error.
pub fn summarize_matches(matches: &[ReviewedMatch]) -> ExplainabilitySummary {
    let mut summary = ExplainabilitySummary::default();

    for (ordinal, reviewed) in matches.iter().take(TOP_CONTRIBUTING_MATCHES).enumerate() {
        let phrase = truncate_phrase(&reviewed.inner.source_concept);
        if phrase.is_empty() {
            continue;
        }

        summary
            .attention_weights
            .insert(format!("{ordinal}_{phrase}"), reviewed.inner.similarity);
        summary.top_contributing_phrases.push(phrase);

        if reviewed.false_positive {
            summary.false_positives_filtered += 1;
        }
    }

    summary
}

/// First [`PHRASE_CHAR_LIMIT`] characters, then trimmed, in that order.
fn truncate_phrase(text: &str) -> String {
    text.chars()
        .take(PHRASE_CHAR_LIMIT)
        .collect::<String>()
        .trim()
        .to_string()
}

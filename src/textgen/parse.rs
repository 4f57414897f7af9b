//! Tolerant parsing of generator output.
//!
//! Chat models are asked for plain JSON but routinely wrap it in markdown
//! fences or pad it with prose. Concept batches are recovered through a
//! two-tier parse and dropped wholesale when neither tier succeeds, so a
//! malformed response degrades an analysis instead of failing it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::concept::RawConceptRecord;

/// Upper bound on recommendations returned per analysis.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Lines at or below this many characters are treated as list chrome
/// (headings, blank separators) rather than recommendations.
const MIN_RECOMMENDATION_CHARS: usize = 15;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json\s*(.*?)\s*```").expect("valid pattern"));

/// Parses a generator response into raw concept records.
///
/// Tries the response verbatim first, then the contents of a ` ```json `
/// fence. A response that parses under neither tier yields an empty batch.
pub fn concept_records(content: &str) -> Vec<RawConceptRecord> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    if let Ok(records) = serde_json::from_str::<Vec<RawConceptRecord>>(content) {
        return records;
    }

    if let Some(captures) = JSON_FENCE.captures(content)
        && let Some(fenced) = captures.get(1)
        && let Ok(records) = serde_json::from_str::<Vec<RawConceptRecord>>(fenced.as_str())
    {
        return records;
    }

    warn!("Generator returned unparseable concept JSON, dropping the batch");
    Vec::new()
}

/// Extracts recommendation lines from a numbered-list response.
///
/// Keeps lines longer than [`MIN_RECOMMENDATION_CHARS`], strips bullet and
/// numbering decoration from both ends, and caps the result at
/// [`MAX_RECOMMENDATIONS`].
pub fn recommendation_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_RECOMMENDATION_CHARS)
        .map(|line| line.trim_matches(is_list_decoration).trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn is_list_decoration(c: char) -> bool {
    c == '\u{2022}' || c == '.' || c == '-' || c == ' ' || c.is_ascii_digit()
}

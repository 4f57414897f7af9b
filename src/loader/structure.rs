//! Heading-based structural parsing of raw page text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::concept::{PaperSection, PaperStructure};

/// Sections shorter than this many words are treated as heading noise and
/// dropped.
pub const MIN_SECTION_WORDS: usize = 50;

/// Character cap on the single fallback section when no heading matched.
pub const FALLBACK_TEXT_CHARS: usize = 12_000;

/// Title used when no plausible title line exists on the first page.
pub const FALLBACK_TITLE: &str = "Untitled Research Paper";

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 150;
const TITLE_CANDIDATE_LINES: usize = 10;
const TITLE_NOISE: [&str; 5] = [
    "abstract",
    "introduction",
    "copyright",
    "permission",
    "license",
];

/// Canonical section names with the heading spellings that map to them,
/// in document-model order.
static SECTION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("abstract", r"(?i)\babstract\b"),
        ("introduction", r"(?i)\bintroduction\b"),
        (
            "related_work",
            r"(?i)related\s+work|literature\s+review|background",
        ),
        (
            "methodology",
            r"(?i)methodology|methods?|proposed\s+(?:approach|method)|approach",
        ),
        ("experiments", r"(?i)experiments?|evaluation|results?"),
        ("conclusion", r"(?i)conclusions?|future\s+work|discussion"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid pattern")))
    .collect()
});

/// Splits loaded pages into a titled, sectioned [`PaperStructure`].
///
/// Every heading occurrence opens a span that runs to the next occurrence
/// of any heading. Spans under [`MIN_SECTION_WORDS`] are skipped. When one
/// name matches several qualifying spans, the last span's content wins but
/// the section keeps its first-seen position. With no qualifying span at
/// all, the whole text becomes one `full_text` section capped at
/// [`FALLBACK_TEXT_CHARS`] characters.
pub fn extract_structure(pages: &[String]) -> PaperStructure {
    let full_text = pages.join("\n");
    let title = extract_title(pages.first().map(String::as_str).unwrap_or_default());

    let mut positions: Vec<(usize, &'static str)> = Vec::new();
    for (name, pattern) in SECTION_PATTERNS.iter() {
        for found in pattern.find_iter(&full_text) {
            positions.push((found.start(), name));
        }
    }
    positions.sort_by_key(|(start, _)| *start);

    let mut sections: Vec<PaperSection> = Vec::new();
    for (i, (start, name)) in positions.iter().enumerate() {
        let end = positions
            .get(i + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(full_text.len());
        let content = full_text[*start..end].trim();
        if content.split_whitespace().count() < MIN_SECTION_WORDS {
            continue;
        }

        match sections.iter_mut().find(|s| s.name == *name) {
            Some(existing) => *existing = PaperSection::new(*name, content),
            None => sections.push(PaperSection::new(*name, content)),
        }
    }

    if sections.is_empty() {
        debug!("No headings detected, using a single full-text section");
        let truncated: String = full_text.chars().take(FALLBACK_TEXT_CHARS).collect();
        sections.push(PaperSection::new("full_text", truncated));
    }

    let structure = PaperStructure::new(title, sections);
    debug!(
        title = %structure.title,
        sections = structure.sections.len(),
        "Extracted paper structure"
    );
    structure
}

/// Best-effort title from the first page.
///
/// Considers the first [`TITLE_CANDIDATE_LINES`] lines whose trimmed length
/// falls strictly inside `(10, 150)` characters, returning the first one
/// free of boilerplate words.
pub fn extract_title(first_page: &str) -> String {
    let candidates = first_page
        .lines()
        .map(str::trim)
        .filter(|line| {
            let chars = line.chars().count();
            chars > TITLE_MIN_CHARS && chars < TITLE_MAX_CHARS
        })
        .take(TITLE_CANDIDATE_LINES);

    for line in candidates {
        let lower = line.to_lowercase();
        if !TITLE_NOISE.iter().any(|noise| lower.contains(noise)) {
            return line.to_string();
        }
    }

    FALLBACK_TITLE.to_string()
}

//! Regex capture of equations, figures, and tables.
//!
//! These concepts never come from the generation service; fixed patterns
//! capture LaTeX fragments and caption references directly from the
//! extracted text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::concept::{Concept, ConceptKind};

const MAX_EQUATIONS: usize = 12;
const MAX_VISUALS: usize = 15;
const EQUATION_CONFIDENCE: f32 = 0.92;
const VISUAL_CONFIDENCE: f32 = 0.85;
const EQUATION_NAME_CHARS: usize = 60;
const EQUATION_KEY_CHARS: usize = 120;
const VISUAL_KEY_CHARS: usize = 40;
const VISUAL_DESCRIPTION_CHARS: usize = 120;

/// Display math, inline math, and numbered-equation references, tried in
/// that order. Display bodies found first win the dedup against their
/// inline re-captures.
static EQUATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\$\$([\s\S]{10,500}?)\$\$",
        r"\$([^$\n]{10,200})\$",
        r"(?:Eq\.?|Equation)\s*\(?\d+[.\d]*\)?\s*[:=]\s*([^\n.]{10,300})",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid pattern"))
    .collect()
});

/// A candidate expression must contain at least one of these to count as
/// math rather than a price or a stray dollar sign.
const MATH_KEYWORDS: [&str; 12] = [
    "\\", "sum", "int", "frac", "argmin", "argmax", "log", "exp", "min", "max", "^", "_",
];

static FIGURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Figure|Fig)\.?\s*(\d+[a-zA-Z]?)\s*(?:[:\-]|shows?|presents?|illustrates?)\s*([^\n.]{15,150})",
    )
    .expect("valid pattern")
});

static TABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Table\s*(\d+[a-zA-Z]?)\s*(?:[:\-]|shows?|lists?)\s*([^\n.]{15,150})")
        .expect("valid pattern")
});

/// Extracts mathematical formulations as equation concepts.
///
/// Deduplicated on whitespace-normalized expression text, capped at
/// [`MAX_EQUATIONS`]. Every equation lands in the methodology section with a
/// fixed high confidence.
pub fn extract_equations(text: &str) -> Vec<Concept> {
    let mut seen = HashSet::new();
    let mut equations = Vec::new();

    for pattern in EQUATION_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            let Some(body) = captures.get(1) else {
                continue;
            };
            let expr = body.as_str().trim();
            let lowered = expr.to_lowercase();
            if expr.chars().count() < 10
                || !MATH_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
            {
                continue;
            }

            let key: String = normalize_whitespace(expr)
                .chars()
                .take(EQUATION_KEY_CHARS)
                .collect();
            if !seen.insert(key) {
                continue;
            }

            let name = format!("Equation: {}...", truncate_chars(expr, EQUATION_NAME_CHARS));
            let description = format!("Mathematical formulation: {expr}");
            if let Ok(concept) = Concept::new(
                name,
                ConceptKind::Equation,
                description,
                "methodology",
                EQUATION_CONFIDENCE,
            ) {
                equations.push(concept);
            }
        }
    }

    equations.truncate(MAX_EQUATIONS);
    equations
}

/// Extracts figure and table caption references as visual concepts.
///
/// Figures are scanned before tables; the combined result is capped at
/// [`MAX_VISUALS`] and attributed to the results section.
pub fn extract_figures_tables(text: &str) -> Vec<Concept> {
    let mut seen = HashSet::new();
    let mut visuals = Vec::new();

    for (kind, label, pattern) in [
        (ConceptKind::Figure, "Figure", &*FIGURE_PATTERN),
        (ConceptKind::Table, "Table", &*TABLE_PATTERN),
    ] {
        for captures in pattern.captures_iter(text) {
            let (Some(number), Some(caption)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let caption = caption.as_str().trim();

            let key = format!(
                "{}-{}-{}",
                kind,
                number.as_str(),
                truncate_chars(caption, VISUAL_KEY_CHARS)
            );
            if !seen.insert(key) {
                continue;
            }

            if let Ok(concept) = Concept::new(
                format!("{label} {}", number.as_str()),
                kind,
                truncate_chars(caption, VISUAL_DESCRIPTION_CHARS),
                "results",
                VISUAL_CONFIDENCE,
            ) {
                visuals.push(concept);
            }
        }
    }

    visuals.truncate(MAX_VISUALS);
    visuals
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

//! Canned documents, concept records, and retrieval results.

use dejavu::concept::{CandidateDocument, RawConceptRecord};

pub const PAPER_TITLE: &str = "Deep Graph Networks For Long Document Analysis";

pub const CANNED_RECOMMENDATION: &str = "Cite the retrieved attention papers directly";

/// A small paper with a title line and two recognizable sections.
pub fn paper_text() -> String {
    let filler: String = (0..60)
        .map(|i| format!("tok{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{PAPER_TITLE}\n\nAbstract\n{filler}\n\nIntroduction\n{filler}")
}

pub fn record(name: &str, confidence: f32) -> RawConceptRecord {
    RawConceptRecord {
        name: name.to_string(),
        kind: "technique".to_string(),
        description: "a recurring construct".to_string(),
        section: "experiments".to_string(),
        confidence: Some(confidence),
    }
}

/// Two records the mock generation service returns for every document, so
/// source and candidates share identical concepts and match at similarity 1.
pub fn technique_records() -> Vec<RawConceptRecord> {
    vec![
        record("attention mechanism", 0.9),
        record("graph pooling", 0.8),
    ]
}

pub fn retrieved(url: &str, title: &str) -> CandidateDocument {
    CandidateDocument {
        publication_year: Some(2021),
        ..CandidateDocument::new(title, url, "arxiv", "sparse graphs snippet")
    }
}

pub fn retrieved_candidates() -> Vec<CandidateDocument> {
    vec![
        retrieved("https://arxiv.org/abs/1", "Sparse Graph Attention"),
        retrieved("https://arxiv.org/abs/2", "Pooling Strategies Revisited"),
    ]
}

//! Untyped concept records as produced by the text generation service.
//!
//! Generator output is JSON with no schema guarantees: fields go missing,
//! types arrive misspelled, confidences drift out of range. The record type
//! accepts all of that at deserialization time and defers judgement to
//! [`RawConceptRecord::validate`], which is the single place a record becomes
//! a trusted [`Concept`].

use serde::{Deserialize, Serialize};

use super::{Concept, ConceptError, ConceptKind};

const DEFAULT_KIND: ConceptKind = ConceptKind::Technique;
const DEFAULT_SECTION: &str = "unknown";
const DEFAULT_CONFIDENCE: f32 = 0.7;

/// Loosely typed concept record, one element of the generator's JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConceptRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl RawConceptRecord {
    /// Promotes the record into a validated [`Concept`].
    ///
    /// Missing fields take documented defaults; a present-but-unknown type or
    /// an out-of-range confidence is an error rather than a silent fixup, so
    /// callers can log exactly what the generator got wrong.
    pub fn validate(self) -> Result<Concept, ConceptError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConceptError::EmptyName);
        }

        let kind = if self.kind.trim().is_empty() {
            DEFAULT_KIND
        } else {
            ConceptKind::parse(&self.kind).ok_or_else(|| ConceptError::UnknownKind {
                value: self.kind.clone(),
            })?
        };

        let section = if self.section.trim().is_empty() {
            DEFAULT_SECTION.to_string()
        } else {
            self.section.trim().to_string()
        };

        let confidence = self.confidence.unwrap_or(DEFAULT_CONFIDENCE);

        Concept::new(
            name.to_string(),
            kind,
            self.description.trim().to_string(),
            section,
            confidence,
        )
    }
}

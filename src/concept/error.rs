use thiserror::Error;

/// Validation failures raised when an untyped concept record is promoted
/// into a [`Concept`](super::Concept).
///
/// Records that fail validation are dropped by callers; they never abort an
/// analysis on their own.
#[derive(Debug, Error)]
pub enum ConceptError {
    #[error("concept name is empty")]
    EmptyName,

    #[error("unknown concept type '{value}'")]
    UnknownKind { value: String },

    #[error("confidence {value} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange { value: f32 },
}

//! Cross-cutting, shared constants.
//!
//! Module-local tunables live next to the code they tune; only values shared
//! by two or more modules belong here. Prefer deriving secondary constants
//! from primary ones to avoid drift.

/// Default embedding dimension (all-minilm family).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Minimum similarity for a neighbor to qualify as a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;

/// Similarity above which a match counts as strong / high-risk.
pub const STRONG_MATCH_THRESHOLD: f32 = 0.85;

/// Weight applied to matches whose source concept is methodology-tagged.
pub const METHODOLOGY_WEIGHT: f32 = 1.5;

/// Maximum retrieved candidate documents per analysis.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Hard cap on concepts kept per analyzed document.
pub const MAX_CONCEPTS_PER_DOCUMENT: usize = 40;

/// Below this many source concepts the pipeline synthesizes fallbacks.
pub const MIN_SOURCE_CONCEPTS: usize = 6;

/// Characters of the leading section used as the search query abstract.
pub const ABSTRACT_QUERY_CHARS: usize = 250;

/// Characters kept from a retrieved document's summary text.
pub const SNIPPET_CHARS: usize = 300;

/// Default request body ceiling for uploaded documents.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Error returned when an embedding dimension check fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match the expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries (embedder output, index construction) to catch
/// mismatches early instead of producing silently wrong similarities.
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

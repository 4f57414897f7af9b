//! Dejavu library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! This crate exposes a large public API to support both the server binary and
//! integration tests. The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Concept`], [`PaperStructure`], [`CandidateDocument`] - Document model
//! - [`AnalysisPipeline`] - The five-stage analysis run
//! - [`AnalysisReport`], [`CandidateSummary`] - The served report
//!
//! ## Matching & Scoring
//! - [`ConceptEmbedder`], [`EmbedderConfig`] - Embedding generation
//! - [`ConceptIndex`] - In-memory similarity index
//! - [`CrossDocumentMatcher`], [`MatcherConfig`] - Concept matching
//! - [`AggregateScorer`], [`RiskAssessment`] - Overlap and novelty scoring
//! - [`summarize_matches`] - Explainability roll-up
//!
//! ## Retrieval & Generation
//! - [`LiteratureSearch`] with [`ArxivProvider`] and [`SemanticScholarProvider`]
//! - [`TextGeneration`] with [`GenaiTextService`] and [`HeuristicTextService`]
//!
//! ## Utilities
//! - [`validate_embedding_dim`] - Dimension validation
//! - Hashing functions for embedding cache keys and concept identity
//!
//! ## Constants
//! Threshold and cap constants are exported for consistency across modules;
//! runtime overrides go through [`Config`].
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod concept;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod explain;
pub mod extract;
pub mod gateway;
pub mod hashing;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod search;
pub mod textgen;

pub use concept::{
    CandidateDocument, Concept, ConceptError, ConceptKind, PaperSection, PaperStructure,
    RawConceptRecord,
};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_CANDIDATES, DEFAULT_SIMILARITY_THRESHOLD,
    DimValidationError, MAX_CONCEPTS_PER_DOCUMENT, METHODOLOGY_WEIGHT, STRONG_MATCH_THRESHOLD,
    validate_embedding_dim,
};
pub use embedding::{ConceptEmbedder, EmbedderConfig, EmbeddingError};
pub use explain::{ExplainabilitySummary, ReviewedMatch, summarize_matches};
pub use extract::ConceptExtractor;
pub use gateway::{AnalyzeRequest, HandlerState, create_router_with_state};
pub use hashing::{hash_text, hash_to_u64, scoped_key};
pub use index::{ConceptIndex, IndexError, ScoredNeighbor};
pub use loader::{DocumentLoader, LoaderError, PlainTextLoader, extract_structure};
pub use matcher::{
    CandidateMatches, ConceptMatch, CrossDocumentMatcher, MatchError, MatcherConfig,
};
pub use pipeline::{AnalysisPipeline, PipelineConfig, PipelineError};
pub use report::{AnalysisReport, CandidateSummary, MatchPair};
pub use scoring::{AggregateScorer, AggregateScores, CandidateBreakdown, RiskAssessment};
pub use search::{
    ArxivProvider, LiteratureSearch, SearchError, SearchProvider, SemanticScholarProvider,
};
#[cfg(any(test, feature = "mock"))]
pub use search::MockSearchProvider;
pub use textgen::{
    GenaiTextService, HeuristicTextService, TextGenError, TextGeneration,
};
#[cfg(any(test, feature = "mock"))]
pub use textgen::MockTextService;

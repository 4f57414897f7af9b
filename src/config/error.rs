//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Similarity threshold outside the half-open unit interval.
    #[error("invalid similarity threshold {value}: must be within (0, 1]")]
    InvalidThreshold { value: f32 },

    /// Candidate limit of zero would retrieve nothing.
    #[error("invalid candidate limit {value}: must be at least 1")]
    InvalidCandidateLimit { value: usize },

    /// Embedding dimension must be non-zero.
    #[error("invalid embedding dimension {value}: must be non-zero")]
    InvalidDimension { value: usize },
}

use std::time::Duration;

use crate::embedding::error::EmbeddingError;

/// Default embedding model served by an Ollama-compatible endpoint.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Default per-request timeout against the embedding endpoint.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default capacity of the in-memory embedding cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
/// Configuration for [`ConceptEmbedder`](super::ConceptEmbedder).
pub struct EmbedderConfig {
    /// Base URL of an Ollama-compatible embedding endpoint. `None` selects
    /// the deterministic hashed backend.
    pub endpoint: Option<String>,
    /// Model name passed to the endpoint, also part of the cache key.
    pub model: String,
    /// Expected output embedding dimension.
    pub embedding_dim: usize,
    /// Maximum entries kept in the embedding cache.
    pub cache_capacity: u64,
    /// Per-request timeout for endpoint calls.
    pub request_timeout: Duration,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: crate::constants::DEFAULT_EMBEDDING_DIM,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config backed by an embedding endpoint.
    pub fn http(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a config for the deterministic hashed backend (no endpoint
    /// required; vectors carry no semantics).
    pub fn hashed() -> Self {
        Self::default()
    }

    pub fn with_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates field combinations before an embedder is constructed.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model name must be non-empty".to_string(),
            });
        }

        if let Some(endpoint) = &self.endpoint
            && endpoint.trim().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "endpoint must be non-empty when set".to_string(),
            });
        }

        Ok(())
    }
}

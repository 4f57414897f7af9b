//! Concept embedding with a pluggable backend.
//!
//! The HTTP backend talks to any Ollama-compatible endpoint; the hashed
//! backend produces deterministic unit vectors from a text hash and exists so
//! the engine runs end to end without external services. Hashed vectors carry
//! no semantics, so similarity scores in that mode are only self-consistent.
//!
//! Every backend output is L2-normalized and cached in memory keyed by
//! `(model, text)`, so repeated canonical texts within and across analyses
//! hit the endpoint once.

/// Embedder configuration.
pub mod config;
mod error;


pub use config::{DEFAULT_EMBEDDING_MODEL, EmbedderConfig};
pub use error::EmbeddingError;

use std::sync::Arc;

use moka::sync::Cache;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::validate_embedding_dim;
use crate::hashing::scoped_key;

enum EmbedderBackend {
    Http {
        client: reqwest::Client,
        endpoint: String,
    },
    Hashed,
    #[cfg(any(test, feature = "mock"))]
    Fixture {
        vectors: std::collections::HashMap<String, Vec<f32>>,
    },
}

/// Embedding generator for concept texts (supports a hashed stub mode).
pub struct ConceptEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    cache: Cache<u64, Arc<Vec<f32>>>,
}

impl std::fmt::Debug for ConceptEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Http { endpoint, .. } => format!("Http({endpoint})"),
                    EmbedderBackend::Hashed => "Hashed".to_string(),
                    #[cfg(any(test, feature = "mock"))]
                    EmbedderBackend::Fixture { vectors } => {
                        format!("Fixture({} texts)", vectors.len())
                    }
                },
            )
            .field("model", &self.config.model)
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct EndpointEmbedding {
    embedding: Vec<f32>,
}

impl ConceptEmbedder {
    /// Builds an embedder from a config.
    pub fn new(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let backend = match &config.endpoint {
            Some(endpoint) => {
                let client = reqwest::Client::builder()
                    .timeout(config.request_timeout)
                    .build()
                    .map_err(|e| EmbeddingError::InvalidConfig {
                        reason: format!("failed to build HTTP client: {e}"),
                    })?;
                EmbedderBackend::Http {
                    client,
                    endpoint: endpoint.trim_end_matches('/').to_string(),
                }
            }
            None => {
                warn!("No embedding endpoint configured, running in hashed stub mode");
                EmbedderBackend::Hashed
            }
        };

        let cache = Cache::new(config.cache_capacity);

        Ok(Self {
            backend,
            config,
            cache,
        })
    }

    /// Builds an embedder that returns preset vectors for known texts and
    /// hashed vectors for everything else. Vectors are normalized on lookup.
    #[cfg(any(test, feature = "mock"))]
    pub fn fixture(
        vectors: std::collections::HashMap<String, Vec<f32>>,
        embedding_dim: usize,
    ) -> Self {
        let config = EmbedderConfig::hashed().with_dim(embedding_dim);
        let cache = Cache::new(config.cache_capacity);
        Self {
            backend: EmbedderBackend::Fixture { vectors },
            config,
            cache,
        }
    }

    /// Embeds a single text, consulting the cache first.
    pub async fn embed(&self, text: &str) -> Result<Arc<Vec<f32>>, EmbeddingError> {
        let key = scoped_key(&self.config.model, text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let raw = match &self.backend {
            EmbedderBackend::Http { client, endpoint } => {
                self.embed_http(client, endpoint, text).await?
            }
            EmbedderBackend::Hashed => self.embed_hashed(text),
            #[cfg(any(test, feature = "mock"))]
            EmbedderBackend::Fixture { vectors } => match vectors.get(text) {
                Some(v) => v.clone(),
                None => self.embed_hashed(text),
            },
        };

        validate_embedding_dim(raw.len(), self.config.embedding_dim)?;

        let vector = Arc::new(normalize(raw));
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    /// Embeds a batch of texts sequentially.
    pub async fn embed_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<Arc<Vec<f32>>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    async fn embed_http(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        text: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Requesting embedding from endpoint");

        let response = client
            .post(format!("{endpoint}/api/embeddings"))
            .json(&serde_json::json!({
                "model": self.config.model,
                "prompt": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        let body: EndpointEmbedding =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        if body.embedding.is_empty() {
            return Err(EmbeddingError::MalformedResponse {
                reason: "endpoint returned an empty embedding".to_string(),
            });
        }

        Ok(body.embedding)
    }

    fn embed_hashed(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        embedding
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Returns `true` if no real endpoint backs this embedder.
    pub fn is_stub(&self) -> bool {
        !matches!(self.backend, EmbedderBackend::Http { .. })
    }

    /// Approximate number of cached vectors.
    pub fn cached_vectors(&self) -> u64 {
        self.cache.entry_count()
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}

//! Literature retrieval from external paper corpora.
//!
//! Each backend implements [`SearchProvider`]; [`LiteratureSearch`] fans a
//! query out to all of them, absorbs individual failures, and merges the
//! results into one deduplicated, capped candidate list. A provider being
//! down degrades the corpus, never the analysis.

pub mod arxiv;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scholar;


pub use arxiv::ArxivProvider;
pub use error::SearchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchProvider;
pub use scholar::SemanticScholarProvider;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use crate::concept::CandidateDocument;

/// One external paper corpus.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Stable tag recorded on every candidate this provider returns.
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        title: &str,
        abstract_text: &str,
        limit: usize,
    ) -> Result<Vec<CandidateDocument>, SearchError>;
}

/// Fan-out aggregator over all configured providers.
pub struct LiteratureSearch {
    providers: Vec<Arc<dyn SearchProvider>>,
    max_candidates: usize,
}

impl LiteratureSearch {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>, max_candidates: usize) -> Self {
        Self {
            providers,
            max_candidates,
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Queries every provider concurrently and merges the results.
    ///
    /// Candidates are deduplicated by url keeping the first occurrence, in
    /// provider registration order then per-provider result order, and the
    /// merged list is capped at the configured maximum. A failing provider
    /// contributes zero results and a warning, nothing else.
    #[instrument(skip_all, fields(providers = self.providers.len()))]
    pub async fn search(&self, title: &str, abstract_text: &str) -> Vec<CandidateDocument> {
        let queries = self
            .providers
            .iter()
            .map(|provider| provider.search(title, abstract_text, self.max_candidates));
        let results = join_all(queries).await;

        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates = Vec::new();

        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(documents) => {
                    for document in documents {
                        if document.url.is_empty() {
                            continue;
                        }
                        if seen.insert(document.url.clone()) {
                            candidates.push(document);
                        }
                    }
                }
                Err(error) => {
                    warn!(
                        provider = provider.name(),
                        %error,
                        "Search provider failed, continuing without its results"
                    );
                }
            }
        }

        candidates.truncate(self.max_candidates);
        debug!(candidates = candidates.len(), "Collected candidate documents");
        candidates
    }
}

impl std::fmt::Debug for LiteratureSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiteratureSearch")
            .field("providers", &self.provider_names())
            .field("max_candidates", &self.max_candidates)
            .finish()
    }
}

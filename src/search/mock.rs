//! Canned search provider for tests and offline runs.

use async_trait::async_trait;

use crate::concept::CandidateDocument;

use super::error::SearchError;
use super::SearchProvider;

pub struct MockSearchProvider {
    name: &'static str,
    results: Vec<CandidateDocument>,
    fail: bool,
}

impl MockSearchProvider {
    /// Provider that always returns the given candidates, up to the limit.
    pub fn with_results(name: &'static str, results: Vec<CandidateDocument>) -> Self {
        Self {
            name,
            results,
            fail: false,
        }
    }

    /// Provider that always fails, for exercising degraded search paths.
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            results: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(
        &self,
        _title: &str,
        _abstract_text: &str,
        limit: usize,
    ) -> Result<Vec<CandidateDocument>, SearchError> {
        if self.fail {
            return Err(SearchError::RequestFailed {
                reason: format!("mock provider {} configured to fail", self.name),
            });
        }
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

use async_trait::async_trait;

use crate::concept::{PaperSection, RawConceptRecord};
use crate::matcher::ConceptMatch;
use crate::textgen::TextGeneration;
use crate::textgen::error::TextGenError;

/// Canned [`TextGeneration`] implementation for tests.
#[derive(Debug, Default, Clone)]
pub struct MockTextService {
    records: Vec<RawConceptRecord>,
    recommendations: Vec<String>,
    fail: bool,
}

impl MockTextService {
    pub fn new(records: Vec<RawConceptRecord>, recommendations: Vec<String>) -> Self {
        Self {
            records,
            recommendations,
            fail: false,
        }
    }

    pub fn with_records(records: Vec<RawConceptRecord>) -> Self {
        Self::new(records, Vec::new())
    }

    /// A service whose every call fails with a provider error.
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            recommendations: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TextGeneration for MockTextService {
    async fn extract_concepts(
        &self,
        _sections: &[PaperSection],
    ) -> Result<Vec<RawConceptRecord>, TextGenError> {
        if self.fail {
            return Err(TextGenError::ProviderUnavailable {
                reason: "mock failure".to_string(),
            });
        }
        Ok(self.records.clone())
    }

    async fn generate_recommendations(
        &self,
        _sample: &[ConceptMatch],
        _novelty_score: f32,
    ) -> Result<Vec<String>, TextGenError> {
        if self.fail {
            return Err(TextGenError::ProviderUnavailable {
                reason: "mock failure".to_string(),
            });
        }
        Ok(self.recommendations.clone())
    }
}

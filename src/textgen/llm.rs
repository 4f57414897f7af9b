use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error};

use crate::concept::{PaperSection, RawConceptRecord};
use crate::matcher::ConceptMatch;
use crate::textgen::error::TextGenError;
use crate::textgen::{TextGeneration, parse};

const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are an expert research paper analyzer. Extract research concepts from the provided sections.
REQUIRED FIELDS per concept: name, type, description, confidence (0.0-1.0), section.
CONCEPT TYPES: algorithm, technique, domain, metric, dataset.
Return a VALID JSON array only. No explanations.";

/// Concept extraction and recommendation generation backed by a chat model.
///
/// The provider is resolved from the model name by `genai`, so the same
/// service works against any backend the ambient API keys unlock.
pub struct GenaiTextService {
    client: Client,
    model: String,
}

impl GenaiTextService {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn exec(&self, messages: Vec<ChatMessage>) -> Result<String, TextGenError> {
        let request = ChatRequest::new(messages);
        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| {
                error!("Provider error: {}", e);
                TextGenError::ProviderUnavailable {
                    reason: e.to_string(),
                }
            })?;
        Ok(response.first_text().unwrap_or_default().to_string())
    }
}

impl std::fmt::Debug for GenaiTextService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiTextService")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextGeneration for GenaiTextService {
    async fn extract_concepts(
        &self,
        sections: &[PaperSection],
    ) -> Result<Vec<RawConceptRecord>, TextGenError> {
        let user = format!("Analyze these sections:\n{}", sections_payload(sections));
        let content = self
            .exec(vec![
                ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
                ChatMessage::user(user),
            ])
            .await?;
        let records = parse::concept_records(&content);
        debug!(
            model = %self.model,
            records = records.len(),
            "Concept extraction response parsed"
        );
        Ok(records)
    }

    async fn generate_recommendations(
        &self,
        sample: &[ConceptMatch],
        novelty_score: f32,
    ) -> Result<Vec<String>, TextGenError> {
        let prompt = recommendation_prompt(sample, novelty_score);
        let content = self.exec(vec![ChatMessage::user(prompt)]).await?;
        Ok(parse::recommendation_lines(&content))
    }
}

fn sections_payload(sections: &[PaperSection]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = sections
        .iter()
        .map(|section| {
            (
                section.name.clone(),
                serde_json::Value::String(section.content.clone()),
            )
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

fn recommendation_prompt(sample: &[ConceptMatch], novelty_score: f32) -> String {
    let evidence = serde_json::to_string_pretty(sample).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Generate 5 SPECIFIC academic recommendations for this paper.\n\n\
         Novelty score: {novelty_score:.1}%\n\n\
         Highest-overlap concept matches:\n{evidence}\n\n\
         REQUIREMENTS:\n\
         1. Cite the overlapping work the matches point to\n\
         2. Suggest concrete ways to improve novelty\n\
         3. Propose methodology extensions\n\
         4. Recommend datasets or applications to explore\n\n\
         Return numbered list only."
    )
}

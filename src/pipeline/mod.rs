//! The five-stage analysis pipeline.
//!
//! One request drives one strictly sequential run: parse, search, extract,
//! match, score. Stage outputs are immutable records handed forward by
//! ownership ([`stages`]); collaborators sit behind trait seams so every
//! stage is testable with canned backends.
//!
//! Degradation policy: a failing search provider, generation service, or
//! sparse extraction narrows the result, it never aborts the run. Only
//! unreadable input and matching-infrastructure failures are fatal.

pub mod error;
pub mod stages;


pub use error::PipelineError;
pub use stages::{ExtractedStage, MatchedStage, ParsedStage, SearchedStage, Stage};

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::constants::{ABSTRACT_QUERY_CHARS, MIN_SOURCE_CONCEPTS};
use crate::embedding::ConceptEmbedder;
use crate::explain::{ReviewedMatch, summarize_matches};
use crate::extract::{ConceptExtractor, fallback_concepts};
use crate::loader::{DocumentLoader, LoaderError, structure::extract_structure};
use crate::matcher::{CandidateMatches, ConceptMatch, CrossDocumentMatcher, MatcherConfig};
use crate::report::{
    AnalysisReport, TEMPORAL_RISK_MULTIPLIER, build_candidate_summaries, render_digest,
};
use crate::scoring::{AggregateScorer, AggregateScores};
use crate::search::LiteratureSearch;
use crate::textgen::{DEGRADED_GENERATION_NOTICE, NO_EVIDENCE_ADVISORY, TextGeneration};

/// Highest-similarity matches handed to recommendation generation.
pub const RECOMMENDATION_EVIDENCE_LIMIT: usize = 5;

/// Tunables threaded through one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Below this many source concepts, fallback synthesis kicks in.
    pub min_source_concepts: usize,
    /// Leading characters of the first section used as the search abstract.
    pub abstract_query_chars: usize,
    pub matcher: MatcherConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_source_concepts: MIN_SOURCE_CONCEPTS,
            abstract_query_chars: ABSTRACT_QUERY_CHARS,
            matcher: MatcherConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.matcher.similarity_threshold = threshold;
        self
    }
}

/// Sequences the five stages over owned stage records.
pub struct AnalysisPipeline {
    loader: Arc<dyn DocumentLoader>,
    search: LiteratureSearch,
    extractor: ConceptExtractor,
    textgen: Arc<dyn TextGeneration>,
    embedder: Arc<ConceptEmbedder>,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        search: LiteratureSearch,
        extractor: ConceptExtractor,
        textgen: Arc<dyn TextGeneration>,
        embedder: Arc<ConceptEmbedder>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            loader,
            search,
            extractor,
            textgen,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn search(&self) -> &LiteratureSearch {
        &self.search
    }

    pub fn embedder(&self) -> &ConceptEmbedder {
        &self.embedder
    }

    /// Runs the full analysis over the document at `path`.
    #[instrument(skip_all, fields(document = %path.display()))]
    pub async fn run(&self, path: &Path) -> Result<AnalysisReport, PipelineError> {
        let parsed = self.parse(path)?;
        let searched = self.search_stage(parsed).await;
        let extracted = self.extract_stage(searched).await;
        let matched = self.match_stage(extracted).await?;
        Ok(self.score_stage(matched).await)
    }

    fn parse(&self, path: &Path) -> Result<ParsedStage, PipelineError> {
        let pages = self.loader.load(path)?;
        let structure = extract_structure(&pages);
        if structure.sections.is_empty() {
            return Err(LoaderError::Unreadable {
                path: path.to_path_buf(),
                reason: "document produced no sections".to_string(),
            }
            .into());
        }

        info!(
            stage = %Stage::Parse,
            title = %structure.title,
            sections = structure.sections.len(),
            "Stage complete"
        );
        Ok(ParsedStage::new(structure))
    }

    async fn search_stage(&self, parsed: ParsedStage) -> SearchedStage {
        let abstract_text: String = parsed
            .structure
            .first_section()
            .map(|section| {
                section
                    .content
                    .chars()
                    .take(self.config.abstract_query_chars)
                    .collect()
            })
            .unwrap_or_default();

        let candidates = self
            .search
            .search(&parsed.structure.title, &abstract_text)
            .await;

        info!(stage = %Stage::Search, candidates = candidates.len(), "Stage complete");
        parsed.into_searched(candidates)
    }

    async fn extract_stage(&self, searched: SearchedStage) -> ExtractedStage {
        let mut source_concepts = self
            .extractor
            .extract_source(&searched.structure.sections)
            .await;
        if source_concepts.len() < self.config.min_source_concepts {
            let synthesized = fallback_concepts(
                &searched.structure.sections,
                source_concepts.len(),
                self.config.min_source_concepts,
            );
            source_concepts.extend(synthesized);
        }

        let mut candidate_concepts = Vec::with_capacity(searched.candidates.len());
        for candidate in &searched.candidates {
            candidate_concepts.push(self.extractor.extract_candidate(&candidate.snippet).await);
        }

        info!(
            stage = %Stage::Extract,
            source_concepts = source_concepts.len(),
            "Stage complete"
        );
        searched.into_extracted(source_concepts, candidate_concepts)
    }

    async fn match_stage(&self, extracted: ExtractedStage) -> Result<MatchedStage, PipelineError> {
        let mut matcher =
            CrossDocumentMatcher::new(self.embedder.clone(), self.config.matcher.clone());
        matcher.index_source(&extracted.source_concepts).await?;
        for candidate in &extracted.candidates {
            matcher
                .index_candidate(&candidate.url, &candidate.concepts)
                .await?;
        }

        // With no candidate index there is nothing to query; an unbuilt
        // source index only errors once a query would actually need it.
        let matches = if matcher.candidate_count() == 0 {
            Vec::new()
        } else {
            matcher.match_all().await?
        };

        info!(
            stage = %Stage::Match,
            candidates_matched = matches.len(),
            total_matches = matches.iter().map(|c| c.matches.len()).sum::<usize>(),
            "Stage complete"
        );
        Ok(extracted.into_matched(matches))
    }

    async fn score_stage(&self, matched: MatchedStage) -> AnalysisReport {
        let scores = AggregateScorer::new().aggregate(&matched.matches);
        let top_similar_papers =
            build_candidate_summaries(&matched.candidates, &matched.matches, &scores);

        let reviewed: Vec<ReviewedMatch> = matched
            .matches
            .iter()
            .flat_map(|candidate| candidate.matches.iter().cloned())
            .map(ReviewedMatch::from)
            .collect();
        let explainability = summarize_matches(&reviewed);

        let recommendations = self.recommendations(&matched.matches, &scores).await;
        let detailed_report = render_digest(
            matched.candidates.len(),
            explainability.top_contributing_phrases.len(),
            &scores,
        );

        info!(
            stage = %Stage::Score,
            risk = %scores.risk_assessment,
            candidates_scored = scores.candidates_scored,
            "Stage complete"
        );

        AnalysisReport {
            submitted_paper_title: matched.structure.title,
            total_internet_papers_analyzed: matched.candidates.len(),
            top_similar_papers,
            overall_overlap_pct: scores.overall_overlap_pct,
            overall_plagiarism_risk: scores.risk_assessment,
            novelty_score: scores.novelty_score,
            temporal_risk_multiplier: TEMPORAL_RISK_MULTIPLIER,
            explainability,
            recommendations,
            detailed_report,
            processed_at: Utc::now().to_rfc3339(),
        }
    }

    /// Recommendation text for the report.
    ///
    /// With zero match evidence the generation service is never invoked; the
    /// fixed advisory goes out instead. Service failures and empty responses
    /// degrade to a notice rather than failing the analysis.
    async fn recommendations(
        &self,
        all_matches: &[CandidateMatches],
        scores: &AggregateScores,
    ) -> Vec<String> {
        let mut evidence: Vec<ConceptMatch> = all_matches
            .iter()
            .flat_map(|candidate| candidate.matches.iter().cloned())
            .collect();
        if evidence.is_empty() {
            return vec![NO_EVIDENCE_ADVISORY.to_string()];
        }

        evidence.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        evidence.truncate(RECOMMENDATION_EVIDENCE_LIMIT);

        let novelty = scores.novelty_score.unwrap_or(0.0);
        match self.textgen.generate_recommendations(&evidence, novelty).await {
            Ok(lines) if !lines.is_empty() => lines,
            Ok(_) => {
                warn!("Generation service returned no recommendations");
                vec![DEGRADED_GENERATION_NOTICE.to_string()]
            }
            Err(error) => {
                warn!(%error, "Recommendation generation failed");
                vec![DEGRADED_GENERATION_NOTICE.to_string()]
            }
        }
    }
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("search", &self.search)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Semantic Scholar search provider over the Graph API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::concept::CandidateDocument;
use crate::constants::SNIPPET_CHARS;

use super::error::SearchError;
use super::SearchProvider;

const GRAPH_API_BASE: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const RESULT_FIELDS: &str = "title,abstract,url,year";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SemanticScholarProvider {
    client: reqwest::Client,
}

impl SemanticScholarProvider {
    pub fn new() -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("dejavu/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SearchProvider for SemanticScholarProvider {
    fn name(&self) -> &'static str {
        "semantic_scholar"
    }

    async fn search(
        &self,
        title: &str,
        abstract_text: &str,
        limit: usize,
    ) -> Result<Vec<CandidateDocument>, SearchError> {
        let query = format!("{title} {abstract_text}");
        let url = format!(
            "{}?query={}&limit={}&fields={}",
            GRAPH_API_BASE,
            urlencoding::encode(query.trim()),
            limit,
            RESULT_FIELDS
        );
        debug!(%url, "Querying Semantic Scholar");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperRecord>,
}

#[derive(Debug, Deserialize)]
struct PaperRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    year: Option<i32>,
}

/// Parses the Graph API JSON body. Records without a url or title are
/// dropped; a missing abstract only costs the snippet.
pub(crate) fn parse_response(body: &str) -> Result<Vec<CandidateDocument>, SearchError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|err| SearchError::ParseFailed {
            reason: err.to_string(),
        })?;

    Ok(parsed
        .data
        .into_iter()
        .filter_map(candidate_from_record)
        .collect())
}

fn candidate_from_record(record: PaperRecord) -> Option<CandidateDocument> {
    let url = record.url.filter(|u| !u.is_empty())?;
    let title = record.title.filter(|t| !t.is_empty())?;

    let snippet: String = record
        .abstract_text
        .unwrap_or_default()
        .chars()
        .take(SNIPPET_CHARS)
        .collect();

    let mut candidate = CandidateDocument::new(title, url, "semantic_scholar", snippet);
    candidate.publication_year = record.year;
    Some(candidate)
}

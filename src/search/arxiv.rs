//! arXiv search provider over the export API's Atom feed.
//!
//! The feed is scanned with plain string operations rather than an XML
//! crate; the tags we need are flat and the format has been stable for
//! years. Tag offsets found this way are always ASCII and therefore valid
//! slice boundaries.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::concept::CandidateDocument;
use crate::constants::SNIPPET_CHARS;

use super::error::SearchError;
use super::SearchProvider;

const ARXIV_API_BASE: &str = "https://export.arxiv.org/api/query";
const ARXIV_USER_AGENT: &str = concat!("dejavu/", env!("CARGO_PKG_VERSION"));

/// arXiv's usage policy asks for at most one request every three seconds.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(3);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ArxivProvider {
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

impl ArxivProvider {
    pub fn new() -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(ARXIV_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            last_request: Mutex::new(None),
        })
    }

    /// Sleeps out the remainder of [`MIN_REQUEST_INTERVAL`] since the last
    /// request. The lock is released before any await point.
    async fn rate_limit(&self) {
        let wait = {
            let last = self.last_request.lock();
            last.and_then(|instant| MIN_REQUEST_INTERVAL.checked_sub(instant.elapsed()))
        };

        if let Some(wait) = wait {
            debug!(wait_ms = wait.as_millis() as u64, "Rate limiting arXiv request");
            tokio::time::sleep(wait).await;
        }

        *self.last_request.lock() = Some(Instant::now());
    }
}

#[async_trait]
impl SearchProvider for ArxivProvider {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    async fn search(
        &self,
        title: &str,
        _abstract_text: &str,
        limit: usize,
    ) -> Result<Vec<CandidateDocument>, SearchError> {
        self.rate_limit().await;

        let url = build_query_url(title, limit);
        debug!(%url, "Querying arXiv");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parse_feed(&body))
    }
}

/// Quoted all-fields title query against the export API.
pub(crate) fn build_query_url(title: &str, limit: usize) -> String {
    let query = format!("all:\"{}\"", title.trim());
    format!(
        "{}?search_query={}&start=0&max_results={}",
        ARXIV_API_BASE,
        urlencoding::encode(&query),
        limit
    )
}

/// Parses every well-formed `<entry>` in the feed into a candidate.
/// Entries missing an id or title are dropped.
pub(crate) fn parse_feed(xml: &str) -> Vec<CandidateDocument> {
    extract_entries(xml)
        .iter()
        .filter_map(|entry| parse_entry(entry))
        .collect()
}

fn parse_entry(entry: &str) -> Option<CandidateDocument> {
    let url = extract_tag_text(entry, "id")?;
    let title = normalize_whitespace(&extract_tag_text(entry, "title")?);
    if url.is_empty() || title.is_empty() {
        return None;
    }

    let summary = normalize_whitespace(&extract_tag_text(entry, "summary").unwrap_or_default());
    let snippet: String = summary.chars().take(SNIPPET_CHARS).collect();

    let mut candidate = CandidateDocument::new(title, url, "arxiv", snippet);
    candidate.publication_year =
        extract_tag_text(entry, "published").and_then(|date| publication_year(&date));
    Some(candidate)
}

/// All `<entry>...</entry>` blocks, in feed order.
fn extract_entries(xml: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut search_from = 0;

    loop {
        let Some(pos) = xml[search_from..].find("<entry>") else {
            break;
        };
        let start = search_from + pos;
        let Some(end_pos) = xml[start..].find("</entry>") else {
            break;
        };
        let end = start + end_pos + "</entry>".len();
        entries.push(xml[start..end].to_string());
        search_from = end;
    }

    entries
}

/// Text of the first `<tag>text</tag>` occurrence; tolerates attributes on
/// the opening tag.
fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let start_pos = xml.find(&open)?;
    let content_start = xml[start_pos..].find('>')? + start_pos + 1;
    let content_end = xml[content_start..].find(&close)? + content_start;

    Some(xml[content_start..content_end].trim().to_string())
}

/// Collapses whitespace runs into single spaces. Feed titles and summaries
/// arrive hard-wrapped with leading indentation.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Year from a timestamp like `2017-06-12T17:57:34Z`.
fn publication_year(date: &str) -> Option<i32> {
    date.split('-').next()?.parse().ok()
}

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::gateway::{DEJAVU_SESSION_HEADER, DEJAVU_STATUS_ANALYZED, DEJAVU_STATUS_HEADER};

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Full document text, form-feed page breaks allowed.
    pub text: String,
    /// Optional client-side filename. Only its final component is used.
    pub filename: Option<String>,
}

const DEFAULT_SPOOL_NAME: &str = "submission.txt";

/// Analyzes one submitted document and returns the full report.
///
/// The document is spooled into a per-request temp directory so the
/// pipeline sees an ordinary file path; the directory is removed when the
/// handler returns, on the error paths included.
#[instrument(skip(state, request), fields(session = tracing::field::Empty))]
pub async fn analyze_handler(
    State(state): State<HandlerState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, GatewayError> {
    if request.text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "document text is empty".to_string(),
        ));
    }

    let session = Uuid::new_v4();
    tracing::Span::current().record("session", tracing::field::display(session));

    let spool = tempfile::tempdir()
        .map_err(|e| GatewayError::Internal(format!("spool directory: {e}")))?;
    let document_path = spool
        .path()
        .join(spool_file_name(request.filename.as_deref()));
    tokio::fs::write(&document_path, request.text.as_bytes())
        .await
        .map_err(|e| GatewayError::Internal(format!("spool write: {e}")))?;

    debug!(bytes = request.text.len(), "Spooled submission for analysis");

    let report = state.pipeline.run(&document_path).await?;

    info!(
        candidates = report.total_internet_papers_analyzed,
        risk = %report.overall_plagiarism_risk,
        "Analysis complete"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        DEJAVU_STATUS_HEADER,
        HeaderValue::from_static(DEJAVU_STATUS_ANALYZED),
    );
    headers.insert(
        DEJAVU_SESSION_HEADER,
        HeaderValue::from_str(&session.to_string())
            .unwrap_or(HeaderValue::from_static("unknown")),
    );

    Ok((StatusCode::OK, headers, Json(report)).into_response())
}

/// Reduces a client-supplied filename to a bare file name, so `..` and
/// separators cannot escape the spool directory.
fn spool_file_name(filename: Option<&str>) -> String {
    filename
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_SPOOL_NAME)
        .to_string()
}

#[cfg(test)]
mod spool_name_tests {
    use super::spool_file_name;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(spool_file_name(Some("paper.txt")), "paper.txt");
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(spool_file_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(spool_file_name(Some("/tmp/x/draft.txt")), "draft.txt");
    }

    #[test]
    fn falls_back_when_missing_or_empty() {
        assert_eq!(spool_file_name(None), "submission.txt");
        assert_eq!(spool_file_name(Some("")), "submission.txt");
        assert_eq!(spool_file_name(Some("..")), "submission.txt");
    }
}

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::index::IndexError;
use crate::matcher::MatchError;
use crate::pipeline::PipelineError;

use super::{DEJAVU_STATUS_ERROR, DEJAVU_STATUS_HEADER};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Analysis(#[from] PipelineError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, dejavu_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Analysis(PipelineError::Input(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unreadable_document")
            }
            GatewayError::Analysis(PipelineError::Matching(MatchError::Index(
                IndexError::Embedding(_),
            ))) => (StatusCode::BAD_GATEWAY, "embedding_error"),
            GatewayError::Analysis(PipelineError::Matching(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "state_error")
            }
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            DEJAVU_STATUS_HEADER,
            HeaderValue::from_str(dejavu_status)
                .unwrap_or(HeaderValue::from_static(DEJAVU_STATUS_ERROR)),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("search endpoint returned status {status}")]
    BadStatus { status: u16 },

    #[error("malformed search response: {reason}")]
    ParseFailed { reason: String },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed {
            reason: err.to_string(),
        }
    }
}

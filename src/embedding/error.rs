use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding endpoint unreachable: {reason}")]
    EndpointUnreachable { reason: String },

    #[error("embedding endpoint returned status {status}")]
    EndpointStatus { status: u16 },

    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    #[error(transparent)]
    Dimension(#[from] DimValidationError),

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::EndpointUnreachable {
            reason: err.to_string(),
        }
    }
}

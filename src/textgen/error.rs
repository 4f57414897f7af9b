use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("text generation provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}

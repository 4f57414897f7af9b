use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot build an index from an empty concept set")]
    EmptyInput,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

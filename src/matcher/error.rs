use thiserror::Error;

use crate::index::IndexError;

#[derive(Debug, Error)]
pub enum MatchError {
    /// `match_all` was called before the source document was indexed.
    #[error("source document has not been indexed")]
    SourceNotIndexed,

    #[error(transparent)]
    Index(#[from] IndexError),
}

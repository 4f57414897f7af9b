use thiserror::Error;

use crate::loader::LoaderError;
use crate::matcher::MatchError;

/// Fatal pipeline failure. Stage degradations (provider outages, sparse
/// extraction) are absorbed before they get here; anything surfacing as this
/// type aborts the analysis.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] LoaderError),

    #[error(transparent)]
    Matching(#[from] MatchError),
}

use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::AnalysisPipeline;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct HandlerState {
    pub pipeline: Arc<AnalysisPipeline>,

    /// Which backend produces concept records and recommendations,
    /// "model" or "heuristic". Surfaced by `/ready` and `/stats`.
    pub generation_backend: &'static str,

    /// Request body cap enforced by the router.
    pub max_upload_bytes: usize,

    pub started_at: Instant,
}

impl HandlerState {
    pub fn new(
        pipeline: Arc<AnalysisPipeline>,
        generation_backend: &'static str,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            pipeline,
            generation_backend,
            max_upload_bytes,
            started_at: Instant::now(),
        }
    }
}

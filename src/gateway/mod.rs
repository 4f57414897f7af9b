//! HTTP gateway (Axum) for document novelty analysis.
//!
//! This module is primarily used by the `dejavu` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{AnalyzeRequest, analyze_handler};
pub use state::HandlerState;

pub const DEJAVU_STATUS_HEADER: &str = "x-dejavu-status";
pub const DEJAVU_SESSION_HEADER: &str = "x-dejavu-session";
pub const DEJAVU_STATUS_HEALTHY: &str = "healthy";
pub const DEJAVU_STATUS_READY: &str = "ready";
pub const DEJAVU_STATUS_ANALYZED: &str = "analyzed";
pub const DEJAVU_STATUS_ERROR: &str = "error";

/// Text embedded by the readiness probe. Memoized after the first
/// successful call, so repeated probes stay off the network.
const READY_PROBE_TEXT: &str = "readiness probe";

pub fn create_router_with_state(state: HandlerState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/stats", get(stats_handler))
        .route("/v1/analyze", post(analyze_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub search: &'static str,
    pub embedding: &'static str,
    pub generation: &'static str,
    pub embedder_mode: &'static str,
}

#[derive(serde::Serialize)]
pub struct StatsResponse {
    pub uptime_secs: u64,
    pub providers: Vec<&'static str>,
    pub max_candidates: usize,
    pub similarity_threshold: f32,
    pub embedding_model: String,
    pub embedding_dim: usize,
    pub embedding_cached_vectors: u64,
    pub generation_backend: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        DEJAVU_STATUS_HEADER,
        HeaderValue::from_static(DEJAVU_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let search_status = if state.pipeline.search().provider_count() > 0 {
        DEJAVU_STATUS_READY
    } else {
        "disabled"
    };

    let embedding_status = match state.pipeline.embedder().embed(READY_PROBE_TEXT).await {
        Ok(_) => DEJAVU_STATUS_READY,
        Err(_) => "pending",
    };

    let embedder_mode = if state.pipeline.embedder().is_stub() {
        "stub"
    } else {
        "http"
    };

    let components = ComponentStatus {
        http: DEJAVU_STATUS_READY,
        search: search_status,
        embedding: embedding_status,
        generation: state.generation_backend,
        embedder_mode,
    };

    // Search is degradable: with no providers every analysis runs against an
    // empty corpus, but the service can still answer. Only the embedding
    // backend gates readiness.
    let is_ready = components.embedding == DEJAVU_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        DEJAVU_STATUS_HEADER,
        HeaderValue::from_str(status_msg).unwrap_or(HeaderValue::from_static(DEJAVU_STATUS_ERROR)),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn stats_handler(State(state): State<HandlerState>) -> Response {
    let pipeline = &state.pipeline;
    let search = pipeline.search();
    let embedder = pipeline.embedder();

    let stats = StatsResponse {
        uptime_secs: state.started_at.elapsed().as_secs(),
        providers: search.provider_names(),
        max_candidates: search.max_candidates(),
        similarity_threshold: pipeline.config().matcher.similarity_threshold,
        embedding_model: embedder.model().to_string(),
        embedding_dim: embedder.embedding_dim(),
        embedding_cached_vectors: embedder.cached_vectors(),
        generation_backend: state.generation_backend,
    };

    (StatusCode::OK, Json(stats)).into_response()
}

//! Dejavu HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use dejavu::config::Config;
use dejavu::embedding::{ConceptEmbedder, EmbedderConfig};
use dejavu::extract::ConceptExtractor;
use dejavu::gateway::{HandlerState, create_router_with_state};
use dejavu::loader::PlainTextLoader;
use dejavu::pipeline::{AnalysisPipeline, PipelineConfig};
use dejavu::search::{ArxivProvider, LiteratureSearch, SearchProvider, SemanticScholarProvider};
use dejavu::textgen::{GenaiTextService, HeuristicTextService, TextGeneration};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██████╗ ███████╗     ██╗ █████╗ ██╗   ██╗██╗   ██╗
██╔══██╗██╔════╝     ██║██╔══██╗██║   ██║██║   ██║
██║  ██║█████╗       ██║███████║██║   ██║██║   ██║
██║  ██║██╔══╝  ██   ██║██╔══██║╚██╗ ██╔╝██║   ██║
██████╔╝███████╗╚█████╔╝██║  ██║ ╚████╔╝ ╚██████╔╝
╚═════╝ ╚══════╝ ╚════╝ ╚═╝  ╚═╝  ╚═══╝   ╚═════╝

        PARSE. MATCH. SCORE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Dejavu starting"
    );

    let embedder_config = match &config.embedding_url {
        Some(url) => EmbedderConfig::http(url, &config.embedding_model),
        None => EmbedderConfig::hashed(),
    }
    .with_dim(config.embedding_dim);
    let embedder = Arc::new(ConceptEmbedder::new(embedder_config)?);

    let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();
    if config.arxiv_enabled {
        providers.push(Arc::new(ArxivProvider::new()?));
    }
    if config.semantic_scholar_enabled {
        providers.push(Arc::new(SemanticScholarProvider::new()?));
    }
    if providers.is_empty() {
        tracing::warn!(
            "All search providers disabled, every analysis will run against an empty corpus"
        );
    }
    let search = LiteratureSearch::new(providers, config.max_candidates);

    let (textgen, generation_backend): (Arc<dyn TextGeneration>, &'static str) =
        match &config.textgen_model {
            Some(model) => (Arc::new(GenaiTextService::new(model)), "model"),
            None => {
                tracing::warn!(
                    "No DEJAVU_TEXTGEN_MODEL configured, using the heuristic generation backend"
                );
                (Arc::new(HeuristicTextService::default()), "heuristic")
            }
        };

    let pipeline_config =
        PipelineConfig::default().with_similarity_threshold(config.similarity_threshold);
    let pipeline = AnalysisPipeline::new(
        Arc::new(PlainTextLoader::new()),
        search,
        ConceptExtractor::new(textgen.clone()),
        textgen,
        embedder,
        pipeline_config,
    );

    let state = HandlerState::new(
        Arc::new(pipeline),
        generation_backend,
        config.max_upload_bytes,
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Dejavu shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("DEJAVU_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

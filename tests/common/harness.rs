//! Spawns the full router on a real listener, backed by mock collaborators.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use dejavu::embedding::{ConceptEmbedder, EmbedderConfig};
use dejavu::extract::ConceptExtractor;
use dejavu::gateway::{HandlerState, create_router_with_state};
use dejavu::loader::PlainTextLoader;
use dejavu::pipeline::{AnalysisPipeline, PipelineConfig};
use dejavu::search::{LiteratureSearch, MockSearchProvider, SearchProvider};
use dejavu::textgen::{MockTextService, TextGeneration};

use super::fixtures;

pub struct TestServerConfig {
    pub providers: Vec<Arc<dyn SearchProvider>>,
    pub textgen: Arc<dyn TextGeneration>,
    pub max_candidates: usize,
    pub max_upload_bytes: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            providers: vec![Arc::new(MockSearchProvider::with_results(
                "arxiv",
                fixtures::retrieved_candidates(),
            ))],
            textgen: Arc::new(MockTextService::new(
                fixtures::technique_records(),
                vec![fixtures::CANNED_RECOMMENDATION.to_string()],
            )),
            max_candidates: 5,
            max_upload_bytes: 1024 * 1024,
        }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signals graceful shutdown and waits for the server task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

pub async fn spawn_test_server(config: TestServerConfig) -> std::io::Result<TestServer> {
    let embedder = Arc::new(
        ConceptEmbedder::new(EmbedderConfig::hashed()).expect("hashed embedder always constructs"),
    );
    let pipeline = AnalysisPipeline::new(
        Arc::new(PlainTextLoader::new()),
        LiteratureSearch::new(config.providers, config.max_candidates),
        ConceptExtractor::new(config.textgen.clone()),
        config.textgen,
        embedder,
        PipelineConfig::default(),
    );
    let state = HandlerState::new(Arc::new(pipeline), "heuristic", config.max_upload_bytes);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = rx.await;
        });
        if let Err(e) = serve.await {
            eprintln!("test server error: {e}");
        }
    });

    Ok(TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    })
}

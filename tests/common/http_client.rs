//! Thin reqwest wrapper over the served API.

use std::time::Duration;

use dejavu::gateway::{DEJAVU_SESSION_HEADER, DEJAVU_STATUS_HEADER};

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(serde::Deserialize)]
pub struct HealthBody {
    pub status: String,
}

#[derive(serde::Deserialize)]
pub struct ReadyBody {
    pub status: String,
    pub components: ComponentsBody,
}

impl ReadyBody {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(serde::Deserialize)]
pub struct ComponentsBody {
    pub http: String,
    pub search: String,
    pub embedding: String,
    pub generation: String,
    pub embedder_mode: String,
}

/// Everything a test usually asserts about one analyze call.
pub struct AnalyzeOutcome {
    pub status: reqwest::StatusCode,
    pub dejavu_status: Option<String>,
    pub session: Option<String>,
    pub body: serde_json::Value,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build client");
        Self { base_url, client }
    }

    pub async fn health(&self) -> Result<HealthBody, reqwest::Error> {
        self.client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    pub async fn ready(&self) -> Result<ReadyBody, reqwest::Error> {
        self.client
            .get(format!("{}/ready", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    pub async fn stats(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/stats", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    pub async fn analyze(
        &self,
        text: &str,
        filename: Option<&str>,
    ) -> Result<AnalyzeOutcome, reqwest::Error> {
        let mut payload = serde_json::json!({ "text": text });
        if let Some(name) = filename {
            payload["filename"] = name.into();
        }
        self.analyze_raw(&payload).await
    }

    /// Sends an arbitrary JSON payload to `/v1/analyze`.
    pub async fn analyze_raw(
        &self,
        payload: &serde_json::Value,
    ) -> Result<AnalyzeOutcome, reqwest::Error> {
        let response = self
            .client
            .post(format!("{}/v1/analyze", self.base_url))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let dejavu_status = header(DEJAVU_STATUS_HEADER);
        let session = header(DEJAVU_SESSION_HEADER);
        let body = response.json().await.unwrap_or(serde_json::Value::Null);

        Ok(AnalyzeOutcome {
            status,
            dejavu_status,
            session,
            body,
        })
    }
}

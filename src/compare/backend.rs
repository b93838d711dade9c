//! Analysis backends a comparison can run.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analyze::Analyzer;
use crate::error_handling::{categorize_reqwest_error, AnalyzeError};
use crate::models::{ExtractionMode, PageProfile};
use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// One side of a comparison: anything that turns a URL into a profile.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> String;

    async fn analyze(&self, url: &str) -> Result<PageProfile, AnalyzeError>;
}

/// Runs an in-process `Analyzer` in a fixed mode.
pub struct LocalBackend {
    analyzer: Arc<Analyzer>,
    mode: ExtractionMode,
}

impl LocalBackend {
    pub fn new(analyzer: Arc<Analyzer>, mode: ExtractionMode) -> Self {
        Self { analyzer, mode }
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn name(&self) -> String {
        format!("{} ({})", self.mode, self.analyzer.engine())
    }

    async fn analyze(&self, url: &str) -> Result<PageProfile, AnalyzeError> {
        self.analyzer.analyze(url, self.mode).await
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    error: Option<String>,
}

/// Calls a remote analysis endpoint: `POST {"url": ...}`, answered with a
/// `PageProfile` on 2xx and `{"error": ...}` otherwise.
pub struct RemoteBackend {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl RemoteBackend {
    pub fn new(client: Arc<reqwest::Client>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> String {
        self.endpoint.clone()
    }

    async fn analyze(&self, url: &str) -> Result<PageProfile, AnalyzeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { url })
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&self.endpoint, &e))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<PageProfile>()
                .await
                .map_err(|e| categorize_reqwest_error(&self.endpoint, &e));
        }

        // An unreadable error body still fails with the remote status
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(AnalyzeError::Backend {
            status: status.as_u16(),
            message: sanitize_and_truncate_error_message(&message),
        })
    }
}

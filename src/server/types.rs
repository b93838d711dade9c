//! API server data structures.

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analyze::Analyzer;
use crate::compare::Backend;
use crate::detection::Taxonomy;
use crate::error_handling::{ExtractionStats, StatsSnapshot};

/// Shared state for the API server.
#[derive(Clone)]
pub struct ServerState {
    /// Serves `/api/analyze` and `/api/analyze/basic`.
    pub analyzer: Arc<Analyzer>,
    /// The two sides of `/api/compare`, local or remote.
    pub basic: Arc<dyn Backend>,
    pub enhanced: Arc<dyn Backend>,
    /// Fetches pages for `/api/seo`.
    pub client: Arc<reqwest::Client>,
    pub taxonomy: Arc<Taxonomy>,
    pub start_time: Arc<Instant>,
}

impl ServerState {
    pub fn stats(&self) -> &Arc<ExtractionStats> {
        self.analyzer.stats()
    }
}

/// Body of the POST endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlRequest {
    pub url: Option<String>,
}

/// Query of `GET /api/seo`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlQuery {
    pub url: Option<String>,
}

/// JSON error body: `{"error": ...}`.
///
/// Carries a short fixed message only. Underlying errors are logged.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Pairs the body with `status`. Unknown codes become 500.
    pub fn into_response_with(self, status: u16) -> Response {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// JSON response for `/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub engine: &'static str,
    pub uptime_seconds: f64,
    pub signatures: usize,
    pub stats: StatsSnapshot,
}

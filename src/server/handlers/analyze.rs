//! Page profile handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{ErrorResponse, ServerState, UrlRequest};
use crate::error_handling::AnalyzeError;
use crate::models::ExtractionMode;

const ANALYZE_FAILED: &str = "Failed to analyze website";

/// Enhanced profile: document facets plus extracted data.
pub async fn analyze_handler(
    State(state): State<ServerState>,
    body: Option<Json<UrlRequest>>,
) -> Response {
    analyze(&state, body, ExtractionMode::Enhanced).await
}

/// Basic profile: document facets only.
pub async fn analyze_basic_handler(
    State(state): State<ServerState>,
    body: Option<Json<UrlRequest>>,
) -> Response {
    analyze(&state, body, ExtractionMode::Basic).await
}

async fn analyze(
    state: &ServerState,
    body: Option<Json<UrlRequest>>,
    mode: ExtractionMode,
) -> Response {
    let url = body.and_then(|Json(b)| b.url).unwrap_or_default();

    match state.analyzer.analyze(&url, mode).await {
        Ok(profile) => Json(profile).into_response(),
        Err(AnalyzeError::Input(message)) => ErrorResponse::new(message).into_response_with(400),
        // Already logged with full detail by the analyzer
        Err(_) => ErrorResponse::new(ANALYZE_FAILED).into_response_with(500),
    }
}

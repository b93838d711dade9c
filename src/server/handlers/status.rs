//! JSON status handler.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{ServerState, StatusResponse};

/// Engine, uptime and extraction statistics.
pub async fn status_handler(State(state): State<ServerState>) -> Response {
    let response = StatusResponse {
        engine: state.analyzer.engine(),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        signatures: state.taxonomy.len(),
        stats: state.stats().snapshot(),
    };
    Json(response).into_response()
}

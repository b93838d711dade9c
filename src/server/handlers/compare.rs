//! Backend comparison handler.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{ErrorResponse, ServerState, UrlRequest};
use crate::compare::compare;
use crate::error_handling::CompareError;

const COMPARE_FAILED: &str = "Failed to compare engines";

pub async fn compare_handler(
    State(state): State<ServerState>,
    body: Option<Json<UrlRequest>>,
) -> Response {
    let url = body.and_then(|Json(b)| b.url).unwrap_or_default();

    match compare(&url, state.basic.as_ref(), state.enhanced.as_ref()).await {
        Ok(report) => Json(report).into_response(),
        Err(CompareError::Input(e)) => ErrorResponse::new(e.to_string()).into_response_with(400),
        Err(e) => {
            log::warn!("Comparison failed for {}: {}", url, e);
            ErrorResponse::new(COMPARE_FAILED).into_response_with(e.status_code())
        }
    }
}

//! SEO summary handler.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{ErrorResponse, ServerState, UrlQuery};
use crate::error_handling::AnalyzeError;
use crate::seo::seo_summary;

const URL_PARAMETER_REQUIRED: &str = "URL parameter is required";
const SEO_FAILED: &str = "Failed to fetch or analyze the website";

pub async fn seo_handler(
    State(state): State<ServerState>,
    Query(query): Query<UrlQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return ErrorResponse::new(URL_PARAMETER_REQUIRED).into_response_with(400);
    };

    match seo_summary(&state.client, &state.taxonomy, &url).await {
        Ok(summary) => Json(summary).into_response(),
        Err(AnalyzeError::Input(message)) => ErrorResponse::new(message).into_response_with(400),
        Err(e) => {
            log::warn!("SEO summary failed for {}: {}", url, e);
            ErrorResponse::new(SEO_FAILED).into_response_with(500)
        }
    }
}

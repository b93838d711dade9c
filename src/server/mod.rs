//! HTTP JSON API.
//!
//! Endpoints:
//! - `POST /api/analyze` - enhanced page profile for `{"url": ...}`
//! - `POST /api/analyze/basic` - basic page profile
//! - `POST /api/compare` - basic and enhanced backends side by side
//! - `GET /api/seo?url=...` - SEO summary from a plain fetch
//! - `GET /status` - engine, uptime and extraction statistics
//!
//! Errors are `{"error": message}` with 400 for a missing or malformed URL and
//! 500 otherwise.

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;

use handlers::{
    analyze_basic_handler, analyze_handler, compare_handler, seo_handler, status_handler,
};
pub use types::{ErrorResponse, ServerState, StatusResponse, UrlRequest};

/// Builds the API router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze/basic", post(analyze_basic_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/seo", get(seo_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn start_api_server(addr: SocketAddr, state: ServerState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}: {}", addr, e))?;

    log::info!("API server listening on http://{}/", addr);
    log::info!("  - Analyze: POST http://{}/api/analyze", addr);
    log::info!("  - Compare: POST http://{}/api/compare", addr);
    log::info!("  - Status: http://{}/status", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::{json, Value};

    use crate::analyze::{Analyzer, AnalyzerOptions};
    use crate::browser::HttpRenderer;
    use crate::compare::LocalBackend;
    use crate::detection::Taxonomy;
    use crate::error_handling::ExtractionStats;
    use crate::models::ExtractionMode;

    const PAGE: &str = r#"<html lang="en"><head>
        <title>Acme Corp | Home</title>
        <meta name="keywords" content="widgets, tools">
        </head><body>
        <h2>One</h2><h2>Two</h2>
        <p>Mail info@acme.test and INFO@acme.test</p>
        </body></html>"#;

    fn http_analyzer(client: &Arc<reqwest::Client>, taxonomy: &Arc<Taxonomy>) -> Arc<Analyzer> {
        Arc::new(Analyzer::new(
            Arc::new(HttpRenderer::new(Arc::clone(client))),
            Arc::clone(taxonomy),
            Arc::new(ExtractionStats::new()),
            AnalyzerOptions::default(),
        ))
    }

    fn state() -> ServerState {
        let client = Arc::new(reqwest::Client::new());
        let taxonomy = Arc::new(Taxonomy::builtin().clone());
        let analyzer = http_analyzer(&client, &taxonomy);
        let basic = http_analyzer(&client, &taxonomy);
        ServerState {
            basic: Arc::new(LocalBackend::new(basic, ExtractionMode::Basic)),
            enhanced: Arc::new(LocalBackend::new(
                Arc::clone(&analyzer),
                ExtractionMode::Enhanced,
            )),
            analyzer,
            client,
            taxonomy,
            start_time: Arc::new(Instant::now()),
        }
    }

    /// Serves the API on an ephemeral port and returns its base URL.
    async fn spawn_api() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router(state())).await;
        });
        format!("http://{}", addr)
    }

    fn page_server() -> Server {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .times(..)
                .respond_with(status_code(200).body(PAGE)),
        );
        server
    }

    #[tokio::test]
    async fn test_analyze_missing_url_is_400() {
        let api = spawn_api().await;
        let client = reqwest::Client::new();

        for body in [json!({}), json!({"url": ""})] {
            let response = client
                .post(format!("{api}/api/analyze"))
                .json(&body)
                .send()
                .await
                .expect("request");
            assert_eq!(response.status().as_u16(), 400);
            let body: Value = response.json().await.expect("json");
            assert_eq!(body["error"], "URL is required");
        }

        // No body at all
        let response = client
            .post(format!("{api}/api/analyze"))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_analyze_enhanced_profile() {
        let pages = page_server();
        let api = spawn_api().await;

        let response = reqwest::Client::new()
            .post(format!("{api}/api/analyze"))
            .json(&json!({"url": pages.url("/").to_string()}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 200);

        let profile: Value = response.json().await.expect("json");
        assert_eq!(profile["title"], "Acme Corp | Home");
        assert_eq!(profile["engine"], "http");
        assert_eq!(
            profile["extractedData"]["businessInfo"]["companyName"],
            "Acme Corp"
        );
        assert_eq!(
            profile["extractedData"]["contactInfo"]["emails"],
            json!(["info@acme.test"])
        );
        assert_eq!(
            profile["extractedData"]["contentAnalysis"]["headingStructure"],
            json!({"h1Count": 0, "h2Count": 2, "h3Count": 0, "hasProperStructure": false})
        );
    }

    #[tokio::test]
    async fn test_analyze_basic_profile() {
        let pages = page_server();
        let api = spawn_api().await;

        let profile: Value = reqwest::Client::new()
            .post(format!("{api}/api/analyze/basic"))
            .json(&json!({"url": pages.url("/").to_string()}))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(profile["mode"], "basic");
        assert!(profile.get("extractedData").is_none());
    }

    #[tokio::test]
    async fn test_analyze_unreachable_is_500() {
        let api = spawn_api().await;

        let response = reqwest::Client::new()
            .post(format!("{api}/api/analyze"))
            .json(&json!({"url": "http://127.0.0.1:9/"}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.expect("json");
        assert_eq!(body, json!({"error": "Failed to analyze website"}));
    }

    #[tokio::test]
    async fn test_compare_report() {
        let pages = page_server();
        let api = spawn_api().await;

        let report: Value = reqwest::Client::new()
            .post(format!("{api}/api/compare"))
            .json(&json!({"url": pages.url("/").to_string()}))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(report["basic"]["success"], true);
        assert_eq!(report["enhanced"]["success"], true);
        assert!(report["totalElapsedMs"].is_u64());
        assert_eq!(report["basic"]["profile"]["mode"], "basic");
        assert_eq!(report["enhanced"]["profile"]["mode"], "enhanced");
    }

    #[tokio::test]
    async fn test_compare_failures_carry_labels_only() {
        let api = spawn_api().await;

        let report: Value = reqwest::Client::new()
            .post(format!("{api}/api/compare"))
            .json(&json!({"url": "http://127.0.0.1:9/"}))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(report["basic"]["success"], false);
        assert_eq!(report["basic"]["error"], "Failed to render page");
        assert_eq!(report["enhanced"]["error"], "Failed to render page");
        assert!(!report.to_string().contains("error sending request"));
    }

    #[tokio::test]
    async fn test_seo_unreachable_is_bare_500() {
        let api = spawn_api().await;

        let response = reqwest::Client::new()
            .get(format!("{api}/api/seo"))
            .query(&[("url", "http://127.0.0.1:9/")])
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.expect("json");
        assert_eq!(body, json!({"error": "Failed to fetch or analyze the website"}));
    }

    #[tokio::test]
    async fn test_seo_endpoint() {
        let pages = page_server();
        let api = spawn_api().await;
        let client = reqwest::Client::new();

        let missing = client
            .get(format!("{api}/api/seo"))
            .send()
            .await
            .expect("request");
        assert_eq!(missing.status().as_u16(), 400);
        let body: Value = missing.json().await.expect("json");
        assert_eq!(body["error"], "URL parameter is required");

        let summary: Value = client
            .get(format!("{api}/api/seo"))
            .query(&[("url", pages.url("/").to_string())])
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(summary["title"], "Acme Corp | Home");
        assert_eq!(summary["keywords"], json!(["widgets", "tools"]));
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let api = spawn_api().await;

        let status: Value = reqwest::get(format!("{api}/status"))
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(status["engine"], "http");
        assert!(status["signatures"].as_u64().is_some_and(|n| n > 0));
        assert_eq!(status["stats"]["profilesBuilt"], 0);
    }

    #[tokio::test]
    async fn test_bind_failure_is_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        let err = start_api_server(addr, state())
            .await
            .expect_err("port already taken");
        assert!(err.to_string().contains("Failed to bind API server"));
    }
}

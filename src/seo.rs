//! Lightweight SEO summary: one plain fetch, no rendering.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::app::validate_and_normalize_url;
use crate::detection::{detect_tool_hits, Taxonomy, ToolHit};
use crate::error_handling::{categorize_reqwest_error, AnalyzeError};
use crate::utils::parse_selector_unsafe;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("title", "TITLE_SELECTOR"));
static DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(r#"meta[name="description" i]"#, "DESCRIPTION_SELECTOR")
});
static KEYWORDS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[name="keywords" i]"#, "KEYWORDS_SELECTOR"));
static OG_IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[property="og:image" i]"#, "OG_IMAGE_SELECTOR"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeoSummary {
    /// Empty when the page has no title.
    pub title: String,
    /// Empty when the page has no meta description.
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    pub tools: Vec<ToolHit>,
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|c| c.trim().to_string())
}

/// Builds the summary from raw HTML. Tool detection runs over the raw
/// document, so it sees everything a browser would receive.
pub fn summarize_html(html: &str, taxonomy: &Taxonomy) -> SeoSummary {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let keywords = meta_content(&document, &KEYWORDS_SELECTOR)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    SeoSummary {
        title,
        description: meta_content(&document, &DESCRIPTION_SELECTOR).unwrap_or_default(),
        keywords,
        og_image: meta_content(&document, &OG_IMAGE_SELECTOR).filter(|s| !s.is_empty()),
        tools: detect_tool_hits(taxonomy, html),
    }
}

/// Fetches `url` and summarizes it.
///
/// # Errors
///
/// `AnalyzeError::Input` for a malformed URL, a transport error when the page
/// cannot be fetched or its body cannot be read.
pub async fn seo_summary(
    client: &reqwest::Client,
    taxonomy: &Taxonomy,
    url: &str,
) -> Result<SeoSummary, AnalyzeError> {
    let url = validate_and_normalize_url(url)?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| categorize_reqwest_error(&url, &e))?;
    let status = response.status();
    let html = response
        .text()
        .await
        .map_err(|e| categorize_reqwest_error(&url, &e))?;

    if !status.is_success() {
        log::debug!("{} answered {}, summarizing the error page", url, status);
    }

    let summary = summarize_html(&html, taxonomy);
    log::info!(
        "SEO summary for {}: {} keywords, {} tools",
        url,
        summary.keywords.len(),
        summary.tools.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Confidence;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const PAGE: &str = r#"<html><head>
        <title> Acme Corp | Home </title>
        <meta name="Description" content="Widgets for everyone">
        <meta name="keywords" content="widgets, , gadgets ,tools">
        <meta property="og:image" content="https://acme.test/og.png">
        <script src="https://js.stripe.com/v3/"></script>
        </head><body></body></html>"#;

    #[test]
    fn test_summarize_html() {
        let summary = summarize_html(PAGE, Taxonomy::builtin());
        assert_eq!(summary.title, "Acme Corp | Home");
        assert_eq!(summary.description, "Widgets for everyone");
        assert_eq!(summary.keywords, vec!["widgets", "gadgets", "tools"]);
        assert_eq!(summary.og_image.as_deref(), Some("https://acme.test/og.png"));

        let stripe = summary
            .tools
            .iter()
            .find(|t| t.name == "Stripe")
            .expect("stripe detected");
        assert_eq!(stripe.category, "Payments");
        assert_eq!(stripe.confidence, Confidence::High);
    }

    #[test]
    fn test_summarize_bare_page() {
        let summary = summarize_html("<p>nothing here</p>", &Taxonomy::empty());
        assert_eq!(summary, SeoSummary::default());

        let json = serde_json::to_value(&summary).expect("json");
        assert!(json.get("ogImage").is_none());
        assert_eq!(json["keywords"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_seo_summary_fetches_page() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(
                status_code(200)
                    .insert_header("Content-Type", "text/html")
                    .body(PAGE),
            ),
        );

        let client = reqwest::Client::new();
        let summary = seo_summary(&client, Taxonomy::builtin(), &server.url("/").to_string())
            .await
            .expect("summary");
        assert_eq!(summary.title, "Acme Corp | Home");
        assert!(summary.tools.iter().all(|t| t.confidence == Confidence::High));
    }

    #[tokio::test]
    async fn test_seo_summary_rejects_blank_url() {
        let client = reqwest::Client::new();
        let err = seo_summary(&client, Taxonomy::builtin(), "")
            .await
            .expect_err("blank");
        assert_eq!(err.status_code(), 400);
    }
}

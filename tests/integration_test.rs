//! End-to-end profiles of in-memory pages through the public API.

mod helpers;

use std::sync::Arc;

use site_profile::browser::Cookie;
use site_profile::detection::Category;
use site_profile::{ExtractionMode, HeadingStructure};

use helpers::{analyzer_for, FixtureRenderer};

const ACME_HOME: &str = r#"<!DOCTYPE html>
<html lang="en-US"><head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="index, follow">
  <meta name="keywords" content="Industrial Supplies, widgets">
  <meta name="geo.placename" content="Springfield">
  <link rel="canonical" href="https://acme.test/">
  <title>Acme Corp | Home</title>
  <style>
    h1 { color: #1A2B3C; font-family: 'Playfair Display', serif; }
    .btn { background: rgb(255, 0, 0); }
  </style>
  <script src="https://js.stripe.com/v3/"></script>
  <script type="application/ld+json">{"@type": "Organization", "name": "Acme Corp"}</script>
  <script type="application/ld+json">{ not json</script>
</head>
<body style="color: #fff">
  <h2>Products</h2>
  <h2>Services</h2>
  <p>Email sales@acme.test, SALES@acme.test or support@acme.test.</p>
  <p>Call 555-123-4567. Visit 123 Main Street.</p>
  <a href="https://www.facebook.com/acme">Facebook</a>
  <a href="https://x.com/acme">X</a>
  <a href="https://github.com/acme/widgets">Code</a>
  <form action="/subscribe" method="POST">
    <input type="email" name="email" placeholder="you@example.com" required>
    <input name="nickname">
  </form>
</body></html>"#;

#[tokio::test]
async fn test_enhanced_profile_of_company_homepage() {
    let renderer = Arc::new(FixtureRenderer::new(ACME_HOME));
    let analyzer = analyzer_for(Arc::clone(&renderer));

    let profile = analyzer
        .analyze("https://acme.test/", ExtractionMode::Enhanced)
        .await
        .expect("profile");

    assert_eq!(profile.title, "Acme Corp | Home");
    assert!(profile.detected_tools.contains(Category::Payments, "Stripe"));
    assert_eq!(
        profile.style.colors,
        vec!["#1a2b3c", "#fff", "rgb(255, 0, 0)"]
    );
    assert_eq!(profile.style.fonts, vec!["Playfair Display"]);

    let structured = profile.structured_data.expect("structured data");
    assert_eq!(structured.len(), 1, "the malformed block is skipped");
    assert_eq!(analyzer.stats().skipped_block_count(), 1);

    let forms = profile.forms.expect("forms");
    assert_eq!(forms[0].action, "https://acme.test/subscribe");
    assert_eq!(forms[0].method, "post");
    assert_eq!(forms[0].inputs[1].input_type, "text");
    assert!(forms[0].inputs[0].required);

    let data = profile.extracted_data.expect("extracted data");
    assert_eq!(data.business_info.company_name.as_deref(), Some("Acme Corp"));
    assert_eq!(data.business_info.industry.as_deref(), Some("Industrial Supplies"));
    assert_eq!(data.business_info.location.as_deref(), Some("Springfield"));
    assert_eq!(data.business_info.description, None);

    assert_eq!(
        data.contact_info.emails.iter().collect::<Vec<_>>(),
        vec!["sales@acme.test", "support@acme.test"]
    );
    assert!(data.contact_info.phones.contains("555-123-4567"));

    assert_eq!(data.social_links.facebook.len(), 1);
    assert_eq!(data.social_links.twitter.len(), 1);
    assert_eq!(data.social_links.github.len(), 1);
    assert_eq!(data.social_links.total(), 3);

    assert_eq!(data.technical_details.charset.as_deref(), Some("utf-8"));
    assert_eq!(data.technical_details.language.as_deref(), Some("en-US"));
    assert_eq!(
        data.technical_details.canonical_url.as_deref(),
        Some("https://acme.test/")
    );

    assert_eq!(
        data.content_analysis.heading_structure,
        HeadingStructure::new(0, 2, 0)
    );
    assert!(!data.content_analysis.heading_structure.has_proper_structure);
    // h2 (15) + more than two links (5)
    assert_eq!(data.content_analysis.content_score, 20);

    assert_eq!(renderer.closed_count(), 1);
}

#[tokio::test]
async fn test_long_article_score_is_capped() {
    let body = "word ".repeat(1500);
    let links = r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#;
    let html = format!(
        "<html><body><h1>Title</h1><h2>Part</h2><img src=\"/x.png\">{links}<p>{body}</p></body></html>"
    );
    let analyzer = analyzer_for(Arc::new(FixtureRenderer::new(&html)));

    let profile = analyzer
        .analyze("https://blog.test/post", ExtractionMode::Enhanced)
        .await
        .expect("profile");
    let analysis = profile.extracted_data.expect("data").content_analysis;

    assert!(analysis.word_count > 1500);
    assert_eq!(analysis.reading_time_minutes, analysis.word_count.div_ceil(200));
    assert_eq!(analysis.content_score, 100);
    assert!(analysis.heading_structure.has_proper_structure);
}

#[tokio::test]
async fn test_cookies_are_reported() {
    let renderer = FixtureRenderer::new("<html><body></body></html>").with_cookies(vec![
        Cookie {
            name: "sid".to_string(),
            value: "abc".to_string(),
            domain: "acme.test".to_string(),
            path: "/".to_string(),
            ..Default::default()
        },
        Cookie {
            name: "pref".to_string(),
            value: "dark".to_string(),
            domain: "acme.test".to_string(),
            path: "/".to_string(),
            expires: Some(1_700_000_000.0),
            secure: true,
            ..Default::default()
        },
    ]);
    let analyzer = analyzer_for(Arc::new(renderer));

    let profile = analyzer
        .analyze("acme.test", ExtractionMode::Basic)
        .await
        .expect("profile");

    assert_eq!(profile.cookies[0].expires, "Session");
    assert_eq!(profile.cookies[1].expires, "2023-11-14T22:13:20.000Z");
    assert!(profile.cookies[1].secure);
}

#[tokio::test]
async fn test_render_failure_is_reported_and_nothing_leaks() {
    let renderer = Arc::new(FixtureRenderer::new(ACME_HOME).failing());
    let analyzer = analyzer_for(Arc::clone(&renderer));

    let err = analyzer
        .analyze("https://acme.test/", ExtractionMode::Enhanced)
        .await
        .expect_err("render failure");

    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("ERR_CONNECTION_RESET"));
    assert_eq!(analyzer.stats().snapshot().analyses_failed, 1);
    assert_eq!(renderer.closed_count(), 0, "no page was opened");
}

#[tokio::test]
async fn test_profile_json_uses_camel_case_keys() {
    let analyzer = analyzer_for(Arc::new(FixtureRenderer::new(ACME_HOME)));
    let profile = analyzer
        .analyze("https://acme.test/", ExtractionMode::Enhanced)
        .await
        .expect("profile");

    let json = serde_json::to_value(&profile).expect("json");
    for key in [
        "title",
        "metaDescription",
        "metaTags",
        "links",
        "images",
        "cookies",
        "detectedTools",
        "screenshot",
        "colors",
        "fonts",
        "structuredData",
        "forms",
        "headings",
        "performanceMetrics",
        "extractedData",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["detectedTools"]["analytics"].is_array());
    assert!(json["screenshot"]
        .as_str()
        .is_some_and(|s| s.starts_with("data:image/png;base64,")));
}

//! Error messages and status codes surfaced to API callers.

use site_profile::{validate_and_normalize_url, AnalyzeError, URL_REQUIRED};

#[test]
fn test_missing_url_message() {
    let err = validate_and_normalize_url("").expect_err("empty");
    assert_eq!(err.to_string(), URL_REQUIRED);
    assert_eq!(err.to_string(), "URL is required");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_unsupported_scheme_names_the_scheme() {
    let err = validate_and_normalize_url("javascript://alert(1)").expect_err("scheme");
    assert!(err.to_string().contains("'javascript'"), "{}", err);
    assert!(err.to_string().contains("http and https"), "{}", err);
}

#[test]
fn test_overlong_url_mentions_limit() {
    let url = format!("https://acme.test/{}", "a".repeat(3000));
    let err = validate_and_normalize_url(&url).expect_err("too long");
    assert!(err.to_string().contains("2048"), "{}", err);
}

#[test]
fn test_render_and_timeout_errors_are_server_errors() {
    let render = AnalyzeError::render("https://acme.test", "net::ERR_NAME_NOT_RESOLVED");
    assert_eq!(render.status_code(), 500);
    assert!(render.to_string().contains("https://acme.test"));

    let timeout = AnalyzeError::Timeout {
        url: "https://acme.test".to_string(),
        secs: 45,
    };
    assert_eq!(timeout.status_code(), 500);
    assert_eq!(timeout.to_string(), "Timed out after 45s analyzing https://acme.test");
}

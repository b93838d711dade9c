//! Browserless renderer: fetches the document over HTTP and serves it as a
//! `StaticPage`. Scripts never run, so client-rendered content is invisible.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::SET_COOKIE;
use url::Url;

use super::{Cookie, PageHandle, Renderer, StaticPage, WaitPolicy};
use crate::error_handling::AnalyzeError;

pub struct HttpRenderer {
    client: Arc<reqwest::Client>,
}

impl HttpRenderer {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    fn engine(&self) -> &'static str {
        "http"
    }

    fn captures_screenshots(&self) -> bool {
        false
    }

    async fn render(
        &self,
        url: &str,
        _wait: WaitPolicy,
    ) -> Result<Box<dyn PageHandle>, AnalyzeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalyzeError::render(url, e))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{} answered {}, profiling the error page", url, status);
        }

        let final_url = response.url().clone();
        let now = Utc::now();
        let cookies: Vec<Cookie> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|header| parse_set_cookie(header, &final_url, now))
            .collect();

        let html = response
            .text()
            .await
            .map_err(|e| AnalyzeError::render(url, e))?;

        Ok(Box::new(
            StaticPage::new(final_url.as_str(), html).with_cookies(cookies),
        ))
    }
}

/// Parses one `Set-Cookie` header value.
///
/// Domain defaults to the response host and path to `/`. `Max-Age` takes
/// precedence over `Expires`; without either the cookie is a session cookie.
pub fn parse_set_cookie(header: &str, origin: &Url, now: DateTime<Utc>) -> Option<Cookie> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = Cookie {
        name: name.to_string(),
        value: value.trim().trim_matches('"').to_string(),
        domain: origin.host_str().unwrap_or_default().to_string(),
        path: "/".to_string(),
        ..Default::default()
    };

    let mut max_age: Option<i64> = None;
    let mut expires: Option<f64> = None;
    for attribute in parts {
        let (key, val) = match attribute.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (attribute.trim(), ""),
        };
        match key.to_ascii_lowercase().as_str() {
            "domain" if !val.is_empty() => {
                cookie.domain = val.trim_start_matches('.').to_string();
            }
            "path" if !val.is_empty() => cookie.path = val.to_string(),
            "secure" => cookie.secure = true,
            "httponly" => cookie.http_only = true,
            "samesite" if !val.is_empty() => cookie.same_site = Some(val.to_string()),
            "max-age" => max_age = val.parse().ok(),
            "expires" => {
                expires = DateTime::parse_from_rfc2822(val)
                    .ok()
                    .map(|dt| dt.timestamp() as f64);
            }
            _ => {}
        }
    }

    cookie.expires = match max_age {
        Some(seconds) => Some((now.timestamp() + seconds) as f64),
        None => expires,
    };
    Some(cookie)
}

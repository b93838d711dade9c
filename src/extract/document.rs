//! Document facets: title, meta tags, links, images, cookies and the screenshot.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat};

use crate::browser::{Cookie, PageHandle, ScreenshotOptions};
use crate::models::{CookieRecord, Image, Link, MetaTag};

const SESSION_EXPIRY: &str = "Session";
const SCREENSHOT_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Full HTML serialization, inline script and style bodies included.
pub async fn page_content(page: &dyn PageHandle) -> anyhow::Result<String> {
    page.content().await
}

/// Document title, empty when the page has none.
pub async fn title(page: &dyn PageHandle) -> anyhow::Result<String> {
    Ok(page.title().await?.unwrap_or_default())
}

pub async fn meta_description(page: &dyn PageHandle) -> anyhow::Result<Option<String>> {
    super::first_attr(page, r#"meta[name="description"]"#, "content").await
}

/// Every `<meta>` element, named by `name` or, failing that, `property`.
pub async fn meta_tags(page: &dyn PageHandle) -> anyhow::Result<Vec<MetaTag>> {
    let metas = page.query_all("meta").await?;
    Ok(metas
        .iter()
        .map(|meta| MetaTag {
            name: meta
                .attr("name")
                .or_else(|| meta.attr("property"))
                .map(str::to_string),
            content: meta.attr("content").map(str::to_string),
        })
        .collect())
}

pub async fn links(page: &dyn PageHandle) -> anyhow::Result<Vec<Link>> {
    let anchors = page.query_all("a[href]").await?;
    Ok(anchors
        .iter()
        .map(|a| Link {
            href: super::resolve_url(page.url(), a.attr("href").unwrap_or_default()),
            text: a.text.trim().to_string(),
            rel: a.attr("rel").unwrap_or_default().to_string(),
        })
        .collect())
}

pub async fn images(page: &dyn PageHandle) -> anyhow::Result<Vec<Image>> {
    let images = page.query_all("img").await?;
    Ok(images
        .iter()
        .map(|img| Image {
            src: img
                .non_empty_attr("src")
                .map(|src| super::resolve_url(page.url(), src))
                .unwrap_or_default(),
            alt: img.attr("alt").unwrap_or_default().to_string(),
        })
        .collect())
}

pub async fn cookies(page: &dyn PageHandle) -> anyhow::Result<Vec<CookieRecord>> {
    Ok(page.cookies().await?.into_iter().map(format_cookie).collect())
}

/// Converts a browser cookie for reporting. Expiry becomes an RFC 3339
/// timestamp with millisecond precision, or `"Session"`.
pub fn format_cookie(cookie: Cookie) -> CookieRecord {
    let expires = cookie
        .expires
        .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0) as i64))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| SESSION_EXPIRY.to_string());

    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires,
        secure: cookie.secure,
        http_only: cookie.http_only,
        same_site: cookie.same_site,
    }
}

/// Full-page PNG capture as a data URL.
pub async fn screenshot(page: &dyn PageHandle) -> anyhow::Result<String> {
    let bytes = page.screenshot(ScreenshotOptions { full_page: true }).await?;
    Ok(encode_screenshot(&bytes))
}

pub fn encode_screenshot(png: &[u8]) -> String {
    format!("{}{}", SCREENSHOT_DATA_URL_PREFIX, BASE64.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::StaticPage;

    const HTML: &str = r#"<html><head>
        <title>Acme</title>
        <meta charset="utf-8">
        <meta name="description" content="Widgets">
        <meta property="og:title" content="Acme Widgets">
        </head><body>
        <a href="/about" rel="nofollow"> About us </a>
        <a href="https://github.com/acme">GitHub</a>
        <a>no href</a>
        <img src="/logo.png" alt="Logo"><img>
        </body></html>"#;

    fn page() -> StaticPage {
        StaticPage::new("https://acme.test/", HTML)
    }

    #[tokio::test]
    async fn test_title_and_description() {
        assert_eq!(title(&page()).await.expect("title"), "Acme");
        assert_eq!(
            meta_description(&page()).await.expect("description").as_deref(),
            Some("Widgets")
        );
        let untitled = StaticPage::new("https://acme.test/", "<p>x</p>");
        assert_eq!(title(&untitled).await.expect("title"), "");
    }

    #[tokio::test]
    async fn test_meta_tags_fall_back_to_property() {
        let tags = meta_tags(&page()).await.expect("meta");
        assert_eq!(tags.len(), 3);
        assert_eq!(
            tags[0],
            MetaTag {
                name: None,
                content: None
            }
        );
        assert_eq!(tags[2].name.as_deref(), Some("og:title"));
        assert_eq!(tags[2].content.as_deref(), Some("Acme Widgets"));
    }

    #[tokio::test]
    async fn test_links_and_images_resolved() {
        let links = links(&page()).await.expect("links");
        assert_eq!(
            links[0],
            Link {
                href: "https://acme.test/about".into(),
                text: "About us".into(),
                rel: "nofollow".into(),
            }
        );
        assert_eq!(links.len(), 2);

        let images = images(&page()).await.expect("images");
        assert_eq!(images[0].src, "https://acme.test/logo.png");
        assert_eq!(images[0].alt, "Logo");
        assert_eq!(images[1], Image::default());
    }

    #[test]
    fn test_cookie_expiry_formatting() {
        let session = format_cookie(Cookie {
            name: "sid".into(),
            ..Default::default()
        });
        assert_eq!(session.expires, "Session");

        let persistent = format_cookie(Cookie {
            name: "pref".into(),
            expires: Some(1_700_000_000.5),
            secure: true,
            ..Default::default()
        });
        assert_eq!(persistent.expires, "2023-11-14T22:13:20.500Z");
        assert!(persistent.secure);
    }

    #[test]
    fn test_screenshot_data_url() {
        assert_eq!(encode_screenshot(b"png"), "data:image/png;base64,cG5n");
    }
}

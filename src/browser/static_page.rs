//! In-memory page backed by a parsed HTML string.

use std::sync::LazyLock;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde_json::json;

use super::{Cookie, ElementSnapshot, PageHandle, Probe, ScreenshotOptions};
use crate::utils::{parse_selector, parse_selector_unsafe};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("title", "TITLE_SELECTOR"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("body", "BODY_SELECTOR"));
static STYLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("style", "STYLE_SELECTOR"));
static STYLED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("[style]", "STYLED_SELECTOR"));
static ANY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("*", "ANY_SELECTOR"));

/// Elements whose text never renders.
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// A page whose DOM is a fixed HTML document.
///
/// There is no layout engine: computed styles fall back to inline
/// declarations, navigation timing reads as zero and screenshots fail.
/// The HTML is re-parsed per call since `scraper::Html` is not `Send`.
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
    cookies: Vec<Cookie>,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            cookies: Vec::new(),
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

fn snapshot(element: ElementRef<'_>) -> ElementSnapshot {
    ElementSnapshot {
        tag: element.value().name().to_ascii_lowercase(),
        attributes: element
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        text: element.text().collect(),
        inner_html: element.inner_html(),
    }
}

fn is_hidden_text_parent(element: &scraper::node::Element) -> bool {
    HIDDEN_TEXT_PARENTS.contains(&element.name())
}

/// Approximates `innerText`: text nodes outside non-rendering elements,
/// one line per text node.
fn visible_text(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut lines = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(is_hidden_text_parent)
        });
        let trimmed = text.trim();
        if !hidden && !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    lines.join("\n")
}

/// `font-family` value declared in an inline style attribute.
fn declared_font_family(style: &str) -> Option<&str> {
    style.split(';').find_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        property
            .trim()
            .eq_ignore_ascii_case("font-family")
            .then(|| value.trim())
    })
}

#[async_trait]
impl PageHandle for StaticPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn content(&self) -> anyhow::Result<String> {
        Ok(self.html.clone())
    }

    async fn title(&self) -> anyhow::Result<Option<String>> {
        let document = self.document();
        Ok(document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string()))
    }

    async fn evaluate(&self, probe: Probe) -> anyhow::Result<serde_json::Value> {
        let document = self.document();
        let value = match probe {
            Probe::VisibleText => json!(visible_text(&document)),
            Probe::StylesheetRules => {
                let sheets: Vec<String> = document
                    .select(&STYLE_SELECTOR)
                    .map(|s| s.text().collect())
                    .collect();
                json!(sheets)
            }
            Probe::InlineStyles => {
                let styles: Vec<&str> = document
                    .select(&STYLED_SELECTOR)
                    .filter_map(|e| e.value().attr("style"))
                    .collect();
                json!(styles)
            }
            Probe::ComputedFontFamilies { limit } => {
                let families: Vec<&str> = document
                    .select(&ANY_SELECTOR)
                    .take(limit)
                    .map(|e| {
                        e.value()
                            .attr("style")
                            .and_then(declared_font_family)
                            .unwrap_or("")
                    })
                    .collect();
                json!(families)
            }
            Probe::NavigationTiming => json!({
                "domContentLoaded": 0,
                "loadComplete": 0,
                "firstContentfulPaint": 0
            }),
        };
        Ok(value)
    }

    async fn query_all(&self, selector: &str) -> anyhow::Result<Vec<ElementSnapshot>> {
        let selector = parse_selector(selector)?;
        let document = self.document();
        Ok(document.select(&selector).map(snapshot).collect())
    }

    async fn cookies(&self) -> anyhow::Result<Vec<Cookie>> {
        Ok(self.cookies.clone())
    }

    async fn screenshot(&self, _opts: ScreenshotOptions) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("screenshots require a browser renderer")
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}

//! Browser-automation seam.
//!
//! Defines the `Renderer` and `PageHandle` traits the extraction pipeline
//! consumes, plus three implementations:
//! - `ChromiumRenderer`: headless Chromium via chromiumoxide
//! - `HttpRenderer`: plain HTTP fetch, used when no browser is available
//! - `StaticPage`: an in-memory page built from an HTML string
//!
//! DOM-side computations are expressed as a closed set of `Probe`s. Browsers
//! run the probe's script; static pages answer it from the parsed HTML.

mod chromium;
mod http;
mod static_page;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error_handling::AnalyzeError;

pub use chromium::{find_chromium, ChromiumRenderer};
pub use http::{parse_set_cookie, HttpRenderer};
pub use static_page::StaticPage;

/// When navigation is considered finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// The load event fired.
    Load,
    /// The load event fired and the network has been quiet for a short settle period.
    #[default]
    NetworkIdle,
}

/// Screenshot capture options. Captures are always PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenshotOptions {
    pub full_page: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self { full_page: true }
    }
}

/// A cookie set for the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Expiry as seconds since the Unix epoch; `None` for session cookies.
    pub expires: Option<f64>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<String>,
}

/// Serializable snapshot of one DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Lower-case tag name.
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Concatenated text content.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub inner_html: String,
}

impl ElementSnapshot {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, trimmed, `None` when absent or blank.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// DOM-side computations a page can be asked to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Rendered text of the document body. Answers a JSON string.
    VisibleText,
    /// `cssText` of every readable style rule. Answers a JSON array of strings.
    /// Stylesheets that cannot be read (cross-origin) are skipped.
    StylesheetRules,
    /// `style` attribute of every element carrying one. JSON array of strings.
    InlineStyles,
    /// Computed `font-family` of the first `limit` elements in document order.
    /// JSON array of strings.
    ComputedFontFamilies { limit: usize },
    /// Navigation timing deltas in milliseconds: JSON object with
    /// `domContentLoaded`, `loadComplete` and `firstContentfulPaint`.
    NavigationTiming,
}

impl Probe {
    /// Script evaluated in the page by browser renderers.
    pub fn script(&self) -> String {
        match self {
            Probe::VisibleText => {
                "(() => document.body ? document.body.innerText : '')()".to_string()
            }
            Probe::StylesheetRules => r#"(() => {
  const rules = [];
  for (const sheet of Array.from(document.styleSheets)) {
    try {
      for (const rule of Array.from(sheet.cssRules || [])) {
        if (rule instanceof CSSStyleRule) rules.push(rule.cssText);
      }
    } catch (e) {}
  }
  return rules;
})()"#
                .to_string(),
            Probe::InlineStyles => {
                "Array.from(document.querySelectorAll('[style]')).map(el => el.style.cssText)"
                    .to_string()
            }
            Probe::ComputedFontFamilies { limit } => format!(
                "Array.from(document.querySelectorAll('*')).slice(0, {limit}).map(el => window.getComputedStyle(el).fontFamily || '')"
            ),
            Probe::NavigationTiming => r#"(() => {
  const t = performance.timing;
  const fcp = performance.getEntriesByType('paint').find(e => e.name === 'first-contentful-paint');
  return {
    domContentLoaded: t.domContentLoadedEventEnd - t.navigationStart,
    loadComplete: t.loadEventEnd - t.navigationStart,
    firstContentfulPaint: fcp ? fcp.startTime : 0
  };
})()"#
                .to_string(),
        }
    }
}

/// A browser engine that renders URLs into page handles.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Short engine name reported in profiles.
    fn engine(&self) -> &'static str;

    /// Whether pages from this renderer can be captured as images.
    fn captures_screenshots(&self) -> bool {
        true
    }

    /// Navigate to `url` and return a handle on the rendered page.
    ///
    /// The caller owns the handle and must close it.
    async fn render(&self, url: &str, wait: WaitPolicy)
        -> Result<Box<dyn PageHandle>, AnalyzeError>;
}

/// One rendered page.
///
/// Reads only: extractors share a `&dyn PageHandle` concurrently.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// URL of the page after redirects.
    fn url(&self) -> &str;
    /// Full HTML serialization of the document.
    async fn content(&self) -> anyhow::Result<String>;
    /// Document title, `None` when absent.
    async fn title(&self) -> anyhow::Result<Option<String>>;
    /// Evaluate a DOM-side probe.
    async fn evaluate(&self, probe: Probe) -> anyhow::Result<serde_json::Value>;
    /// Snapshot every element matching a CSS selector, in document order.
    async fn query_all(&self, selector: &str) -> anyhow::Result<Vec<ElementSnapshot>>;
    async fn cookies(&self) -> anyhow::Result<Vec<Cookie>>;
    /// PNG capture of the page.
    async fn screenshot(&self, opts: ScreenshotOptions) -> anyhow::Result<Vec<u8>>;
    /// Release the page.
    async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

/// Scoped ownership of a rendered page.
///
/// `close` releases the page explicitly. If the guard is dropped first (an
/// early return, or the enclosing future cancelled by a caller-side timeout),
/// the close is spawned onto the current runtime instead.
pub struct PageGuard {
    page: Option<Box<dyn PageHandle>>,
}

impl PageGuard {
    pub fn new(page: Box<dyn PageHandle>) -> Self {
        Self { page: Some(page) }
    }

    pub fn page(&self) -> &dyn PageHandle {
        // Only `close` and `drop` take the page, and both consume the guard.
        self.page
            .as_deref()
            .expect("page is held until the guard is closed")
    }

    pub async fn close(mut self) {
        if let Some(page) = self.page.take() {
            let url = page.url().to_string();
            if let Err(e) = page.close().await {
                log::warn!("Failed to close page for {}: {}", url, e);
            }
        }
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        let Some(page) = self.page.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let url = page.url().to_string();
                    if let Err(e) = page.close().await {
                        log::warn!("Failed to close abandoned page for {}: {}", url, e);
                    }
                });
            }
            Err(_) => {
                log::warn!("No runtime available to close page for {}", page.url());
            }
        }
    }
}

// Shared test helpers: in-memory renderers and analyzer construction.
//
// Pages are served from HTML strings through `StaticPage`, so no browser or
// network is needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use site_profile::browser::{
    Cookie, ElementSnapshot, PageHandle, Probe, Renderer, ScreenshotOptions, StaticPage,
    WaitPolicy,
};
use site_profile::detection::Taxonomy;
use site_profile::{AnalyzeError, Analyzer, AnalyzerOptions, ExtractionStats};

/// Wraps a `StaticPage` and counts `close` calls.
pub struct TrackedPage {
    inner: StaticPage,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl PageHandle for TrackedPage {
    fn url(&self) -> &str {
        self.inner.url()
    }
    async fn content(&self) -> anyhow::Result<String> {
        self.inner.content().await
    }
    async fn title(&self) -> anyhow::Result<Option<String>> {
        self.inner.title().await
    }
    async fn evaluate(&self, probe: Probe) -> anyhow::Result<Value> {
        self.inner.evaluate(probe).await
    }
    async fn query_all(&self, selector: &str) -> anyhow::Result<Vec<ElementSnapshot>> {
        self.inner.query_all(selector).await
    }
    async fn cookies(&self) -> anyhow::Result<Vec<Cookie>> {
        self.inner.cookies().await
    }
    async fn screenshot(&self, _opts: ScreenshotOptions) -> anyhow::Result<Vec<u8>> {
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }
    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Renders every URL as the same HTML document after `delay`.
pub struct FixtureRenderer {
    html: String,
    cookies: Vec<Cookie>,
    delay: Duration,
    fail: bool,
    pub closed: Arc<AtomicUsize>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl FixtureRenderer {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            cookies: Vec::new(),
            delay: Duration::ZERO,
            fail: false,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Navigation fails after `delay`.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for FixtureRenderer {
    fn engine(&self) -> &'static str {
        "fixture"
    }

    async fn render(
        &self,
        url: &str,
        _wait: WaitPolicy,
    ) -> Result<Box<dyn PageHandle>, AnalyzeError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(AnalyzeError::render(url, "net::ERR_CONNECTION_RESET"));
        }
        Ok(Box::new(TrackedPage {
            inner: StaticPage::new(url, self.html.clone()).with_cookies(self.cookies.clone()),
            closed: Arc::clone(&self.closed),
        }))
    }
}

/// An analyzer over `renderer` with the built-in taxonomy.
pub fn analyzer_for(renderer: Arc<FixtureRenderer>) -> Arc<Analyzer> {
    Arc::new(Analyzer::new(
        renderer,
        Arc::new(Taxonomy::builtin().clone()),
        Arc::new(ExtractionStats::new()),
        AnalyzerOptions::default(),
    ))
}

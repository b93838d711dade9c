//! Headless Chromium renderer using chromiumoxide.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{Cookie, ElementSnapshot, PageHandle, Probe, Renderer, ScreenshotOptions, WaitPolicy};
use crate::config::CHROMIUM_PATH_ENV;
use crate::error_handling::{AnalyzeError, InitializationError};

/// Quiet period after the load event for `WaitPolicy::NetworkIdle`.
const NETWORK_IDLE_SETTLE: Duration = Duration::from_millis(500);

/// Locate a Chromium binary.
///
/// Order: the explicit path, the `SITE_PROFILE_CHROMIUM` environment
/// variable, then `google-chrome`, `chromium` and `chromium-browser` on PATH.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        log::warn!("Configured Chromium path {} does not exist", path.display());
    }

    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .iter()
        .find_map(|bin| which::which(bin).ok())
}

/// Renderer backed by one long-lived headless Chromium process.
///
/// Each render opens a fresh tab; the tab is released by `PageHandle::close`.
pub struct ChromiumRenderer {
    browser: Browser,
    user_agent: String,
    handler: JoinHandle<()>,
}

impl ChromiumRenderer {
    /// Launch headless Chromium from `chrome_path`.
    ///
    /// `profile` names the user data directory, so two renderers in one
    /// process never share a browser profile.
    pub async fn launch(
        chrome_path: PathBuf,
        user_agent: &str,
        profile: &str,
    ) -> Result<Self, InitializationError> {
        let data_dir = std::env::temp_dir().join(format!(
            "site_profile-{}-{}",
            profile,
            std::process::id()
        ));
        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .user_data_dir(data_dir)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .build()
            .map_err(InitializationError::BrowserError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| InitializationError::BrowserError(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("Browser handler event error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            user_agent: user_agent.to_string(),
            handler,
        })
    }

    async fn navigate(&self, page: &Page, url: &str, wait: WaitPolicy) -> anyhow::Result<String> {
        page.set_user_agent(self.user_agent.as_str()).await?;
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        if wait == WaitPolicy::NetworkIdle {
            tokio::time::sleep(NETWORK_IDLE_SETTLE).await;
        }
        Ok(page.url().await?.unwrap_or_else(|| url.to_string()))
    }
}

impl Drop for ChromiumRenderer {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    fn engine(&self) -> &'static str {
        "chromium"
    }

    async fn render(
        &self,
        url: &str,
        wait: WaitPolicy,
    ) -> Result<Box<dyn PageHandle>, AnalyzeError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AnalyzeError::render(url, e))?;

        match self.navigate(&page, url, wait).await {
            Ok(final_url) => Ok(Box::new(ChromiumPage { page, final_url })),
            Err(e) => {
                // The tab exists but no handle escapes, so release it here
                if let Err(close_err) = page.close().await {
                    log::warn!("Failed to close tab after navigation error: {}", close_err);
                }
                Err(AnalyzeError::render(url, e))
            }
        }
    }
}

/// One Chromium tab.
pub struct ChromiumPage {
    page: Page,
    final_url: String,
}

fn query_script(selector: &str) -> anyhow::Result<String> {
    let literal = serde_json::to_string(selector)?;
    Ok(format!(
        "Array.from(document.querySelectorAll({literal})).map(el => ({{ \
tag: el.tagName.toLowerCase(), \
attributes: Object.fromEntries(Array.from(el.attributes).map(a => [a.name, a.value])), \
text: el.textContent || '', \
innerHtml: el.innerHTML }}))"
    ))
}

#[async_trait]
impl PageHandle for ChromiumPage {
    fn url(&self) -> &str {
        &self.final_url
    }

    async fn content(&self) -> anyhow::Result<String> {
        Ok(self.page.content().await?)
    }

    async fn title(&self) -> anyhow::Result<Option<String>> {
        Ok(self.page.get_title().await?)
    }

    async fn evaluate(&self, probe: Probe) -> anyhow::Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(probe.script())
            .await
            .with_context(|| format!("probe {:?} failed", probe))?;
        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert probe result: {e:?}"))
    }

    async fn query_all(&self, selector: &str) -> anyhow::Result<Vec<ElementSnapshot>> {
        let result = self
            .page
            .evaluate(query_script(selector)?)
            .await
            .with_context(|| format!("query '{}' failed", selector))?;
        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert element snapshots: {e:?}"))
    }

    async fn cookies(&self) -> anyhow::Result<Vec<Cookie>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| Cookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                expires: (!c.session && c.expires > 0.0).then_some(c.expires),
                secure: c.secure,
                http_only: c.http_only,
                same_site: c.same_site.map(|s| format!("{:?}", s)),
            })
            .collect())
    }

    async fn screenshot(&self, opts: ScreenshotOptions) -> anyhow::Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(opts.full_page)
            .build();
        Ok(self.page.screenshot(params).await?)
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.page.close().await?;
        Ok(())
    }
}

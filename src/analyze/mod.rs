//! Extraction orchestration.
//!
//! An `Analyzer` turns one URL into one `PageProfile`:
//! 1. Validate and normalize the URL (before any rendering work)
//! 2. Render the page with the configured `Renderer`
//! 3. Run every extractor of the requested mode concurrently
//! 4. Release the page, on success, failure or timeout alike
//!
//! Only input, render and timeout errors abort an analysis. Extractor failures
//! are absorbed into the facet's empty default and counted in `ExtractionStats`.

mod context;
mod profile;

use std::sync::Arc;

use crate::app::validate_and_normalize_url;
use crate::browser::{PageGuard, Renderer};
use crate::detection::Taxonomy;
use crate::error_handling::{AnalyzeError, ExtractionStats};
use crate::models::{ExtractionMode, PageProfile};

pub use context::{AnalysisContext, AnalyzerOptions};
pub use profile::extract_profile;

/// Analyzes pages with one renderer, taxonomy and set of options.
#[derive(Clone)]
pub struct Analyzer {
    ctx: AnalysisContext,
}

impl Analyzer {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        taxonomy: Arc<Taxonomy>,
        stats: Arc<ExtractionStats>,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            ctx: AnalysisContext::new(renderer, taxonomy, stats, options),
        }
    }

    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.ctx.renderer
    }

    /// Name of the engine behind this analyzer's renderer.
    pub fn engine(&self) -> &'static str {
        self.renderer().engine()
    }

    pub fn stats(&self) -> &Arc<ExtractionStats> {
        &self.ctx.stats
    }

    /// Profiles `url` in the given mode.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::Input` for a missing or malformed URL
    /// - `AnalyzeError::Render` when navigation fails
    /// - `AnalyzeError::Timeout` when the whole analysis outlives
    ///   `AnalyzerOptions::render_timeout`
    pub async fn analyze(
        &self,
        url: &str,
        mode: ExtractionMode,
    ) -> Result<PageProfile, AnalyzeError> {
        let url = validate_and_normalize_url(url)?;
        let timeout = self.ctx.options.render_timeout;
        let start = tokio::time::Instant::now();

        let run = self.render_and_extract(&url, mode);
        let result = match tokio::time::timeout(timeout, run).await {
            Ok(result) => result,
            Err(_) => Err(AnalyzeError::Timeout {
                url: url.clone(),
                secs: timeout.as_secs(),
            }),
        };

        match &result {
            Ok(_) => {
                self.ctx.stats.record_profile();
                log::info!(
                    "Profiled {} ({} mode, {}) in {:.2}s",
                    url,
                    mode,
                    self.engine(),
                    start.elapsed().as_secs_f64()
                );
            }
            Err(e) => {
                self.ctx.stats.record_analysis_failure();
                log::warn!("Failed to profile {}: {}", url, e);
            }
        }
        result
    }

    async fn render_and_extract(
        &self,
        url: &str,
        mode: ExtractionMode,
    ) -> Result<PageProfile, AnalyzeError> {
        let renderer = &self.ctx.renderer;
        let page = renderer.render(url, self.ctx.options.wait).await?;

        // Dropping the guard (e.g. when the caller's timeout fires) still
        // releases the page.
        let guard = PageGuard::new(page);
        let profile = extract_profile(guard.page(), mode, &self.ctx, renderer.engine()).await;
        guard.close().await;
        Ok(profile)
    }
}

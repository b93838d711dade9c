//! Shared resources for analyzing pages.

use std::sync::Arc;
use std::time::Duration;

use crate::browser::{Renderer, WaitPolicy};
use crate::config::{Config, COMPUTED_FONT_SAMPLE, RENDER_TIMEOUT};
use crate::detection::Taxonomy;
use crate::error_handling::ExtractionStats;

/// Per-analysis knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Caller-side timeout covering render, extraction and release.
    pub render_timeout: Duration,
    pub capture_screenshot: bool,
    /// Elements whose computed font-family is sampled.
    pub font_sample: usize,
    pub wait: WaitPolicy,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            render_timeout: RENDER_TIMEOUT,
            capture_screenshot: true,
            font_sample: COMPUTED_FONT_SAMPLE,
            wait: WaitPolicy::NetworkIdle,
        }
    }
}

impl AnalyzerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            render_timeout: config.render_timeout(),
            capture_screenshot: config.capture_screenshot,
            font_sample: config.computed_font_sample,
            wait: WaitPolicy::NetworkIdle,
        }
    }
}

/// Resources shared by every analysis.
///
/// Cloning is cheap: every field is reference-counted or `Copy`.
#[derive(Clone)]
pub struct AnalysisContext {
    pub renderer: Arc<dyn Renderer>,
    pub taxonomy: Arc<Taxonomy>,
    pub stats: Arc<ExtractionStats>,
    pub options: AnalyzerOptions,
}

impl AnalysisContext {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        taxonomy: Arc<Taxonomy>,
        stats: Arc<ExtractionStats>,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            renderer,
            taxonomy,
            stats,
            options,
        }
    }

    /// Whether a screenshot is attempted for each page.
    pub fn screenshots_enabled(&self) -> bool {
        self.options.capture_screenshot && self.renderer.captures_screenshots()
    }
}

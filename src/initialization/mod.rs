//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client
//! - Renderer (headless Chromium or the HTTP fallback)
//! - Tool taxonomy
//! - API server state
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod renderer;

use std::sync::Arc;
use std::time::Instant;

use crate::analyze::{Analyzer, AnalyzerOptions};
use crate::compare::{Backend, LocalBackend, RemoteBackend};
use crate::config::Config;
use crate::detection::Taxonomy;
use crate::error_handling::{ExtractionStats, InitializationError};
use crate::models::ExtractionMode;
use crate::server::ServerState;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use renderer::init_renderer;

/// Loads the configured signature file, or the built-in catalogue.
///
/// # Errors
///
/// Returns `InitializationError::TaxonomyError` if the file cannot be read or parsed.
pub async fn init_taxonomy(config: &Config) -> Result<Arc<Taxonomy>, InitializationError> {
    match &config.signatures {
        Some(path) => Ok(Arc::new(Taxonomy::load(path).await?)),
        None => Ok(Arc::new(Taxonomy::builtin().clone())),
    }
}

/// Renderer profile of the primary analyzer.
const MAIN_PROFILE: &str = "main";
/// Renderer profile of the local basic comparison backend.
const BASIC_PROFILE: &str = "basic";

/// Everything needed to analyze, compare and serve.
#[derive(Clone)]
pub struct Resources {
    pub client: Arc<reqwest::Client>,
    pub taxonomy: Arc<Taxonomy>,
    pub analyzer: Arc<Analyzer>,
}

impl Resources {
    /// The basic side of a comparison: the remote endpoint when configured,
    /// otherwise a local analyzer in basic mode.
    ///
    /// The local analyzer has its own renderer and stats, so it shares no
    /// browser with the enhanced side.
    pub async fn basic_backend(&self, config: &Config) -> Arc<dyn Backend> {
        match config.remote_basic_endpoint.as_deref() {
            Some(endpoint) => self.remote(endpoint),
            None => Arc::new(LocalBackend::new(
                self.isolated_analyzer(config).await,
                ExtractionMode::Basic,
            )),
        }
    }

    /// The enhanced side of a comparison, backed by the primary analyzer
    /// unless a remote endpoint is configured.
    pub fn enhanced_backend(&self, config: &Config) -> Arc<dyn Backend> {
        match config.remote_enhanced_endpoint.as_deref() {
            Some(endpoint) => self.remote(endpoint),
            None => Arc::new(LocalBackend::new(
                Arc::clone(&self.analyzer),
                ExtractionMode::Enhanced,
            )),
        }
    }

    fn remote(&self, endpoint: &str) -> Arc<dyn Backend> {
        Arc::new(RemoteBackend::new(Arc::clone(&self.client), endpoint))
    }

    /// A fresh analyzer with its own renderer and stats.
    async fn isolated_analyzer(&self, config: &Config) -> Arc<Analyzer> {
        let renderer = init_renderer(config, Arc::clone(&self.client), BASIC_PROFILE).await;
        Arc::new(Analyzer::new(
            renderer,
            Arc::clone(&self.taxonomy),
            Arc::new(ExtractionStats::new()),
            AnalyzerOptions::from_config(config),
        ))
    }

    pub async fn server_state(&self, config: &Config) -> ServerState {
        ServerState {
            analyzer: Arc::clone(&self.analyzer),
            basic: self.basic_backend(config).await,
            enhanced: self.enhanced_backend(config),
            client: Arc::clone(&self.client),
            taxonomy: Arc::clone(&self.taxonomy),
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Initializes the client, taxonomy, renderer and analyzer from `config`.
///
/// # Errors
///
/// Returns an `InitializationError` if the HTTP client cannot be built or the
/// signature file cannot be loaded. A missing browser is not an error.
pub async fn init_resources(config: &Config) -> Result<Resources, InitializationError> {
    let client = init_client(config)?;
    let taxonomy = init_taxonomy(config).await?;
    let renderer = init_renderer(config, Arc::clone(&client), MAIN_PROFILE).await;
    let analyzer = Arc::new(Analyzer::new(
        renderer,
        Arc::clone(&taxonomy),
        Arc::new(ExtractionStats::new()),
        AnalyzerOptions::from_config(config),
    ));

    Ok(Resources {
        client,
        taxonomy,
        analyzer,
    })
}

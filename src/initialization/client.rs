//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Maximum redirects followed by plain fetches.
const MAX_REDIRECTS: usize = 10;

/// Initializes the shared HTTP client.
///
/// Used by the HTTP fallback renderer, the SEO summary and remote backends.
/// Carries the configured User-Agent and fetch timeout.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot be
/// initialized.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.http_timeout())
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(Arc::new(client))
}

//! Renderer selection.

use std::sync::Arc;

use crate::browser::{find_chromium, ChromiumRenderer, HttpRenderer, Renderer};
use crate::config::Config;

/// Picks the renderer for this process.
///
/// Headless Chromium when a binary can be found and launched; otherwise the
/// HTTP fallback, which cannot run scripts or take screenshots. `http_only`
/// skips browser discovery entirely. Every call yields a new renderer; a
/// launched browser gets its own `profile` directory.
pub async fn init_renderer(
    config: &Config,
    client: Arc<reqwest::Client>,
    profile: &str,
) -> Arc<dyn Renderer> {
    if config.http_only {
        log::info!("Using HTTP renderer (browser disabled)");
        return Arc::new(HttpRenderer::new(client));
    }

    let Some(path) = find_chromium(config.chromium_path.as_deref()) else {
        log::warn!(
            "No Chromium binary found; falling back to the HTTP renderer. \
             Screenshots and script-rendered content will be missing."
        );
        return Arc::new(HttpRenderer::new(client));
    };

    match ChromiumRenderer::launch(path.clone(), &config.user_agent, profile).await {
        Ok(renderer) => {
            log::info!("Using headless Chromium at {} ({})", path.display(), profile);
            Arc::new(renderer)
        }
        Err(e) => {
            log::warn!("{}; falling back to the HTTP renderer", e);
            Arc::new(HttpRenderer::new(client))
        }
    }
}

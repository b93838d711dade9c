//! Configuration constants.
//!
//! This module defines the constants used throughout the pipeline, including
//! timeouts, scoring weights and normalization tables.

use std::time::Duration;

/// Default address for the HTTP API.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Per-page render timeout in seconds.
/// Covers navigation, waiting for network idle, every extractor and the screenshot.
pub const RENDER_TIMEOUT_SECS: u64 = 45;
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(RENDER_TIMEOUT_SECS);

/// Timeout for a plain HTTP fetch (fallback renderer, SEO summary, remote backends).
pub const HTTP_TIMEOUT_SECS: u64 = 20;

/// Maximum URL length accepted as input.
pub const MAX_URL_LENGTH: usize = 2048;

/// User-Agent presented to analyzed sites.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Environment variable pointing at a Chromium binary.
pub const CHROMIUM_PATH_ENV: &str = "SITE_PROFILE_CHROMIUM";

// Content analysis
/// Average reading speed used for `readingTimeMinutes`.
pub const WORDS_PER_MINUTE: usize = 200;
/// Word count above which the first length bonus applies.
pub const SCORE_WORDS_MEDIUM: usize = 300;
/// Word count above which the second length bonus applies.
pub const SCORE_WORDS_LONG: usize = 1000;
pub const SCORE_MEDIUM_LENGTH: u32 = 25;
pub const SCORE_LONG_LENGTH: u32 = 25;
pub const SCORE_HAS_H1: u32 = 20;
pub const SCORE_HAS_H2: u32 = 15;
pub const SCORE_HAS_IMAGES: u32 = 10;
pub const SCORE_HAS_LINKS: u32 = 5;
/// More than this many hyperlinks earns the link bonus.
pub const SCORE_LINK_THRESHOLD: usize = 2;
pub const MAX_CONTENT_SCORE: u32 = 100;

// Style profile
/// Number of elements (document order) whose computed font-family is sampled.
pub const COMPUTED_FONT_SAMPLE: usize = 50;
/// Generic CSS font families, never reported as fonts.
pub const GENERIC_FONT_FAMILIES: &[&str] =
    &["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// Maximum length of an error message relayed from a remote backend.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

//! CSS selector and regex construction helpers for static patterns.

use regex::Regex;
use scraper::Selector;

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Parses a caller-supplied CSS selector.
pub fn parse_selector(selector_str: &str) -> anyhow::Result<Selector> {
    Selector::parse(selector_str)
        .map_err(|e| anyhow::anyhow!("invalid CSS selector '{}': {}", selector_str, e))
}

/// Compiles a regex pattern that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the pattern does not compile (indicates a programming error).
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

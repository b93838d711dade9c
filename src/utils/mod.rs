//! Shared helpers.
//!
//! This module provides:
//! - CSS selector and regex construction for static patterns
//! - Error message sanitization
//! - Elapsed-time conversion

pub mod sanitize;
mod selector;

use std::time::Duration;

pub use selector::{compile_regex_unsafe, parse_selector, parse_selector_unsafe};

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

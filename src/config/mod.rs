//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, scoring weights, normalization tables)
//! - Configuration types (`Config`, log level and format)

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};

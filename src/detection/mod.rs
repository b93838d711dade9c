//! Third-party tool detection.
//!
//! This module classifies raw page content against a taxonomy of vendor
//! signatures:
//! - `taxonomy`: the closed set of categories and the signature catalogue
//! - `detector`: matching content against a taxonomy
//!
//! Matching is case-insensitive and boolean; a signature matches when any of
//! its patterns occurs in the content.

mod detector;
mod taxonomy;

// Re-export public API
pub use detector::{detect_tool_hits, detect_tools, Confidence, DetectionResult, ToolHit};
pub use taxonomy::{Category, Taxonomy, ToolSignature};

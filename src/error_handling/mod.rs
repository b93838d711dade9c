//! Error handling and extraction statistics.
//!
//! This module provides:
//! - Error type definitions (`AnalyzeError`, `CompareError`, `InitializationError`)
//! - Categorization of transport errors
//! - Extraction statistics (absorbed facet failures, skipped blocks)
//!
//! Errors are split by how far they propagate:
//! - **Input / Render / Transport**: surface to the caller as a failed backend
//! - **Field / Parse**: absorbed during extraction, counted in `ExtractionStats`

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::{ExtractionStats, StatsSnapshot};
pub use types::{AnalyzeError, CompareError, Facet, InitializationError};

//! site_profile library: profiles a public web page.
//!
//! A profile covers document metadata, cookies, links and images, detected
//! third-party tools, colors and fonts, a full-page screenshot and, in
//! enhanced mode, contact, social, business, technical and content signals.
//!
//! # Example
//!
//! ```no_run
//! use site_profile::initialization::init_resources;
//! use site_profile::{Config, ExtractionMode};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let resources = init_resources(&config).await?;
//!
//! let profile = resources
//!     .analyzer
//!     .analyze("example.com", ExtractionMode::Enhanced)
//!     .await?;
//! println!("{} uses {} tools", profile.title, profile.detected_tools.total());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Headless Chromium is used when it
//! can be found; otherwise pages are fetched over plain HTTP.

pub mod analyze;
mod app;
pub mod browser;
pub mod compare;
pub mod config;
pub mod detection;
mod error_handling;
pub mod extract;
pub mod initialization;
mod models;
pub mod seo;
pub mod server;
mod utils;

// Re-export public API
pub use analyze::{Analyzer, AnalyzerOptions};
pub use app::{validate_and_normalize_url, URL_REQUIRED};
pub use compare::{compare, ComparisonReport};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    AnalyzeError, CompareError, ExtractionStats, Facet, InitializationError, StatsSnapshot,
};
pub use models::*;

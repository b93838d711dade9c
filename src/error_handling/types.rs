//! Error type definitions.
//!
//! This module defines the errors surfaced to callers and the facets whose
//! failures are absorbed and counted during extraction.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error launching or connecting to the browser.
    #[error("Browser initialization error: {0}")]
    BrowserError(String),

    /// Error loading a signature file.
    #[error("Taxonomy initialization error: {0}")]
    TaxonomyError(String),
}

/// Errors that abort the analysis of one URL by one backend.
///
/// Extraction failures of a single facet never show up here: they are absorbed
/// by the orchestrator and replaced with the facet's empty default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Missing or malformed input URL. Rejected before any rendering work.
    #[error("{0}")]
    Input(String),

    /// Navigation or browser-automation failure.
    #[error("Failed to render {url}: {message}")]
    Render { url: String, message: String },

    /// The caller-side timeout elapsed before the profile was assembled.
    #[error("Timed out after {secs}s analyzing {url}")]
    Timeout { url: String, secs: u64 },

    /// A remote backend could not be reached or returned an unreadable body.
    #[error("Transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// A remote backend answered with a non-success status.
    #[error("Backend responded with status {status}: {message}")]
    Backend { status: u16, message: String },
}

impl AnalyzeError {
    pub fn render(url: &str, err: impl std::fmt::Display) -> Self {
        AnalyzeError::Render {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP status equivalent: 400 for input errors, the remote status for
    /// backend errors, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyzeError::Input(_) => 400,
            AnalyzeError::Backend { status, .. } => *status,
            _ => 500,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AnalyzeError::Transport { .. })
    }

    /// Short fixed description, safe to hand back to API callers.
    pub fn label(&self) -> &'static str {
        match self {
            AnalyzeError::Input(_) => "Invalid URL",
            AnalyzeError::Render { .. } => "Failed to render page",
            AnalyzeError::Timeout { .. } => "Analysis timed out",
            AnalyzeError::Transport { .. } => "Backend unreachable",
            AnalyzeError::Backend { .. } => "Backend returned an error",
        }
    }
}

/// The comparison itself failed: both backends failed and the transport errored.
#[derive(Error, Debug, Clone)]
pub enum CompareError {
    /// Missing or malformed input URL. Neither backend was called.
    #[error(transparent)]
    Input(AnalyzeError),

    #[error("Both backends failed (basic: {basic}; enhanced: {enhanced})")]
    BothFailed {
        basic: AnalyzeError,
        enhanced: AnalyzeError,
    },
}

impl CompareError {
    pub fn status_code(&self) -> u16 {
        match self {
            CompareError::Input(_) => 400,
            CompareError::BothFailed { .. } => 500,
        }
    }
}

/// A facet of the page profile produced by one extraction step.
///
/// Used to count extraction failures that were absorbed and replaced with
/// empty defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Facet {
    Title,
    PageContent,
    MetaTags,
    Links,
    Images,
    Cookies,
    Screenshot,
    Colors,
    Fonts,
    StructuredData,
    Forms,
    Headings,
    Performance,
    ContactInfo,
    SocialLinks,
    BusinessInfo,
    TechnicalDetails,
    ContentAnalysis,
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Title => "title",
            Facet::PageContent => "page content",
            Facet::MetaTags => "meta tags",
            Facet::Links => "links",
            Facet::Images => "images",
            Facet::Cookies => "cookies",
            Facet::Screenshot => "screenshot",
            Facet::Colors => "colors",
            Facet::Fonts => "fonts",
            Facet::StructuredData => "structured data",
            Facet::Forms => "forms",
            Facet::Headings => "headings",
            Facet::Performance => "performance metrics",
            Facet::ContactInfo => "contact info",
            Facet::SocialLinks => "social links",
            Facet::BusinessInfo => "business info",
            Facet::TechnicalDetails => "technical details",
            Facet::ContentAnalysis => "content analysis",
        }
    }
}

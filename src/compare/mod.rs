//! Side-by-side comparison of the basic and enhanced backends.
//!
//! Both backends run concurrently against the same URL under one wall-clock
//! measurement. Each side succeeds or fails on its own; the comparison itself
//! only fails when the URL is rejected or when neither backend could be
//! reached at all.

mod backend;

use serde::{Deserialize, Serialize};

use crate::app::validate_and_normalize_url;
use crate::error_handling::{AnalyzeError, CompareError};
use crate::models::PageProfile;
use crate::utils::duration_to_ms;

pub use backend::{Backend, LocalBackend, RemoteBackend};

/// What the basic backend covers.
pub const BASIC_FEATURES: &[&str] = &[
    "Basic SEO analysis",
    "Meta tags extraction",
    "Links and images",
    "Color and font extraction",
    "Tool detection",
    "Screenshot capture",
    "Cookie analysis",
];

/// What the enhanced backend adds.
pub const ENHANCED_FEATURES: &[&str] = &[
    "Enhanced SEO analysis",
    "Advanced data extraction",
    "Contact info extraction",
    "Social media detection",
    "Business info analysis",
    "Content analysis",
    "Form detection",
    "Structured data parsing",
    "Performance metrics",
    "Heading structure analysis",
];

pub const USE_ENHANCED_WHEN: &[&str] = &[
    "More comprehensive data extraction",
    "Better structured data handling",
    "Enhanced contact and business info extraction",
    "Content quality analysis",
    "Form detection capabilities",
];

pub const USE_BASIC_WHEN: &[&str] = &[
    "Lighter setup and smaller payloads",
    "Only document metadata is needed",
    "Faster for basic operations",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Outcome of one backend within a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<PageProfile>,
    /// Short failure label; the full error is only logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub features: Vec<String>,
}

impl BackendReport {
    fn from_result(result: &Result<PageProfile, AnalyzeError>, features: &[&str]) -> Self {
        let (profile, error) = match result {
            Ok(profile) => (Some(profile.clone()), None),
            Err(e) => (None, Some(e.label().to_string())),
        };
        BackendReport {
            success: profile.is_some(),
            profile,
            error,
            features: to_strings(features),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub use_enhanced: Vec<String>,
    pub use_basic: Vec<String>,
}

impl Default for Recommendations {
    fn default() -> Self {
        Recommendations {
            use_enhanced: to_strings(USE_ENHANCED_WHEN),
            use_basic: to_strings(USE_BASIC_WHEN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub url: String,
    /// Wall-clock time of the joint run, not the sum of both sides.
    pub total_elapsed_ms: u64,
    pub basic: BackendReport,
    pub enhanced: BackendReport,
    pub recommendations: Recommendations,
}

/// Runs `basic` and `enhanced` concurrently against `url`.
///
/// # Errors
///
/// - `CompareError::Input` when `url` is missing or malformed
/// - `CompareError::BothFailed` when both backends failed with transport errors
pub async fn compare(
    url: &str,
    basic: &dyn Backend,
    enhanced: &dyn Backend,
) -> Result<ComparisonReport, CompareError> {
    let url = validate_and_normalize_url(url).map_err(CompareError::Input)?;

    log::info!(
        "Comparing {} with {} and {}",
        url,
        basic.name(),
        enhanced.name()
    );
    let start = tokio::time::Instant::now();
    let (basic_result, enhanced_result) = tokio::join!(basic.analyze(&url), enhanced.analyze(&url));
    let total_elapsed_ms = duration_to_ms(start.elapsed());

    if let (Err(b), Err(e)) = (&basic_result, &enhanced_result) {
        if b.is_transport() && e.is_transport() {
            return Err(CompareError::BothFailed {
                basic: b.clone(),
                enhanced: e.clone(),
            });
        }
    }

    for (name, result) in [(basic.name(), &basic_result), (enhanced.name(), &enhanced_result)] {
        if let Err(e) = result {
            log::warn!("Backend {} failed for {}: {}", name, url, e);
        }
    }
    log::info!("Compared {} in {}ms", url, total_elapsed_ms);

    Ok(ComparisonReport {
        basic: BackendReport::from_result(&basic_result, BASIC_FEATURES),
        enhanced: BackendReport::from_result(&enhanced_result, ENHANCED_FEATURES),
        url,
        total_elapsed_ms,
        recommendations: Recommendations::default(),
    })
}

//! URL validation and normalization.

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AnalyzeError;

/// Message for a missing or blank URL.
pub const URL_REQUIRED: &str = "URL is required";

/// Validates and normalizes a URL supplied by a caller.
///
/// Trims surrounding whitespace and adds an `https://` prefix when no scheme
/// is present, then checks that the URL parses, uses http or https, has a host
/// and stays within `MAX_URL_LENGTH` characters.
///
/// Every rejection is an `AnalyzeError::Input`, raised before any rendering work.
pub fn validate_and_normalize_url(url: &str) -> Result<String, AnalyzeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AnalyzeError::Input(URL_REQUIRED.to_string()));
    }

    let normalized = match url.split_once("://") {
        Some((scheme, _))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            url.to_string()
        }
        Some((scheme, _)) if !scheme.is_empty() && !scheme.contains(['/', '.', '?', '#']) => {
            return Err(AnalyzeError::Input(format!(
                "Unsupported URL scheme '{}': only http and https are allowed",
                scheme
            )));
        }
        _ => format!("https://{url}"),
    };

    // Checked after normalization, since the https:// prefix may push it over
    if normalized.len() > MAX_URL_LENGTH {
        log::warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return Err(AnalyzeError::Input(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(normalized),
        Ok(_) => Err(AnalyzeError::Input(format!("URL has no host: {}", url))),
        Err(e) => Err(AnalyzeError::Input(format!("Invalid URL '{}': {}", url, e))),
    }
}

//! Error categorization.
//!
//! Maps transport-level failures from `reqwest` onto `AnalyzeError`.

use super::types::AnalyzeError;

/// Categorizes a `reqwest::Error` raised while calling `endpoint`.
///
/// HTTP status errors become `AnalyzeError::Backend` with the remote status;
/// everything else (timeouts, connection failures, undecodable bodies) is a
/// transport error.
pub fn categorize_reqwest_error(endpoint: &str, error: &reqwest::Error) -> AnalyzeError {
    if let Some(status) = error.status() {
        return AnalyzeError::Backend {
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else if error.is_decode() {
        format!("unreadable response body: {error}")
    } else if error.is_redirect() {
        format!("redirect error: {error}")
    } else {
        error.to_string()
    };

    AnalyzeError::Transport {
        endpoint: endpoint.to_string(),
        message,
    }
}

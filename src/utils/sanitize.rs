//! Utilities for sanitizing error messages relayed from remote backends.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters other than newline, tab and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes a message and truncates it to `MAX_ERROR_MESSAGE_LENGTH` characters.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();
    if length <= MAX_ERROR_MESSAGE_LENGTH {
        return sanitized;
    }
    let kept: String = sanitized
        .chars()
        .take(MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50))
        .collect();
    format!("{}... (truncated, original length: {} chars)", kept, length)
}

//! Navigation timing.

use crate::browser::{PageHandle, Probe};
use crate::models::PerformanceMetrics;

pub async fn performance_metrics(page: &dyn PageHandle) -> anyhow::Result<PerformanceMetrics> {
    let value = page.evaluate(Probe::NavigationTiming).await?;
    Ok(performance_from_value(&value))
}

/// Reads the timing object. Missing, null or non-numeric entries read as
/// zero, as do negative deltas from a load event that has not fired yet.
pub fn performance_from_value(value: &serde_json::Value) -> PerformanceMetrics {
    let read = |key: &str| {
        value
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .unwrap_or(0.0)
    };
    PerformanceMetrics {
        dom_content_loaded: read("domContentLoaded"),
        load_complete: read("loadComplete"),
        first_contentful_paint: read("firstContentfulPaint"),
    }
}

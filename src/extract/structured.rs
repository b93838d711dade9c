//! JSON-LD extraction.

use crate::browser::PageHandle;
use crate::error_handling::ExtractionStats;

const JSON_LD_SELECTOR_STR: &str = r#"script[type="application/ld+json"]"#;

/// Parses every `application/ld+json` block on the page.
///
/// Blocks that fail to parse are skipped and counted in `stats`.
pub async fn structured_data(
    page: &dyn PageHandle,
    stats: &ExtractionStats,
) -> anyhow::Result<Vec<serde_json::Value>> {
    let scripts = page.query_all(JSON_LD_SELECTOR_STR).await?;
    let (blocks, skipped) = parse_json_ld_blocks(scripts.iter().map(|s| s.text.as_str()));
    if skipped > 0 {
        stats.record_skipped_blocks(skipped);
    }
    Ok(blocks)
}

/// Parses each block independently. Returns the parsed values, in document
/// order, and the number of blocks skipped.
pub fn parse_json_ld_blocks<'a>(
    blocks: impl IntoIterator<Item = &'a str>,
) -> (Vec<serde_json::Value>, usize) {
    let mut parsed = Vec::new();
    let mut skipped = 0;
    for (index, block) in blocks.into_iter().enumerate() {
        match serde_json::from_str(block.trim()) {
            Ok(value) => parsed.push(value),
            Err(e) => {
                log::debug!("Skipping malformed JSON-LD block {}: {}", index, e);
                skipped += 1;
            }
        }
    }
    (parsed, skipped)
}

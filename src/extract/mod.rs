//! Field extractors.
//!
//! This module reads the facets of a page profile from a rendered page:
//! - Document facets (title, meta tags, links, images, cookies, screenshot)
//! - Contact info, social links, business info, technical details
//! - Content analysis and scoring
//! - Colors and fonts
//! - JSON-LD blocks, forms, headings, performance timing
//!
//! Each async extractor takes a `&dyn PageHandle` and only reads from it, so
//! the orchestrator runs them concurrently against one page. The parsing
//! itself lives in plain functions over strings and element snapshots.

mod business;
mod contact;
mod content;
mod document;
mod forms;
mod headings;
mod performance;
mod social;
mod structured;
mod style;
mod technical;

use url::Url;

use crate::browser::{PageHandle, Probe};

pub use business::{business_info, business_info_from_meta, MetaIndex};
pub use contact::{contact_info, contact_info_from_text};
pub use content::{content_analysis, content_score, ContentSignals};
pub use document::{
    cookies, encode_screenshot, format_cookie, images, links, meta_description, meta_tags,
    page_content, screenshot, title,
};
pub use forms::{form_from_snapshot, forms};
pub use headings::{heading_from_snapshot, headings};
pub use performance::{performance_metrics, performance_from_value};
pub use social::{classify_platform, social_links, social_links_from_hrefs, Platform};
pub use structured::{parse_json_ld_blocks, structured_data};
pub use style::{colors, colors_from_css, fonts, fonts_from_families};
pub use technical::technical_details;

/// Rendered body text of the page.
pub(crate) async fn visible_text(page: &dyn PageHandle) -> anyhow::Result<String> {
    let value = page.evaluate(Probe::VisibleText).await?;
    Ok(serde_json::from_value(value)?)
}

/// A probe answering a JSON array of strings.
pub(crate) async fn string_list(
    page: &dyn PageHandle,
    probe: Probe,
) -> anyhow::Result<Vec<String>> {
    let value = page.evaluate(probe).await?;
    Ok(serde_json::from_value(value)?)
}

/// Attribute of the first element matching `selector`; `None` when there is
/// no such element or the attribute is missing or blank.
pub(crate) async fn first_attr(
    page: &dyn PageHandle,
    selector: &str,
    attr: &str,
) -> anyhow::Result<Option<String>> {
    let elements = page.query_all(selector).await?;
    Ok(elements
        .first()
        .and_then(|e| e.non_empty_attr(attr))
        .map(str::to_string))
}

/// Resolves `href` against `base`. Unresolvable references are returned as-is.
pub fn resolve_url(base: &str, href: &str) -> String {
    let href = href.trim();
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

//! Technical metadata: direct reads, no fallback chain.

use crate::browser::PageHandle;
use crate::models::TechnicalDetails;

pub async fn technical_details(page: &dyn PageHandle) -> anyhow::Result<TechnicalDetails> {
    let (charset, viewport, robots, language, canonical) = tokio::try_join!(
        super::first_attr(page, "meta[charset]", "charset"),
        super::first_attr(page, r#"meta[name="viewport"]"#, "content"),
        super::first_attr(page, r#"meta[name="robots"]"#, "content"),
        super::first_attr(page, "html[lang]", "lang"),
        super::first_attr(page, r#"link[rel="canonical"]"#, "href"),
    )?;

    Ok(TechnicalDetails {
        charset,
        viewport,
        robots_directive: robots,
        language,
        canonical_url: canonical,
    })
}

//! Concurrent extraction of one page into a `PageProfile`.

use crate::browser::PageHandle;
use crate::detection::detect_tools;
use crate::error_handling::{ExtractionStats, Facet};
use crate::extract;
use crate::models::{ExtractedData, ExtractionMode, PageProfile, StyleProfile};

use super::context::AnalysisContext;

/// Unwraps an extractor result. A failure is logged, counted against its
/// facet and replaced with the facet's empty default.
fn settle<T: Default>(
    stats: &ExtractionStats,
    url: &str,
    facet: Facet,
    result: anyhow::Result<T>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to extract {} from {}: {:#}", facet, url, e);
            stats.record_field_failure(facet);
            T::default()
        }
    }
}

/// Runs every extractor of `mode` concurrently against `page`.
///
/// Never fails: a failing extractor only empties its own facet.
pub async fn extract_profile(
    page: &dyn PageHandle,
    mode: ExtractionMode,
    ctx: &AnalysisContext,
    engine: &str,
) -> PageProfile {
    let url = page.url();
    let stats = ctx.stats.as_ref();
    let capture = ctx.screenshots_enabled();

    let screenshot = async {
        if capture {
            Some(extract::screenshot(page).await)
        } else {
            None
        }
    };

    let enhanced = async {
        match mode {
            ExtractionMode::Basic => None,
            ExtractionMode::Enhanced => Some(tokio::join!(
                extract::structured_data(page, stats),
                extract::forms(page),
                extract::headings(page),
                extract::performance_metrics(page),
                extract::contact_info(page),
                extract::social_links(page),
                extract::business_info(page),
                extract::technical_details(page),
                extract::content_analysis(page),
            )),
        }
    };

    let (
        content,
        title,
        meta_description,
        meta_tags,
        links,
        images,
        cookies,
        screenshot,
        colors,
        fonts,
        enhanced,
    ) = tokio::join!(
        extract::page_content(page),
        extract::title(page),
        extract::meta_description(page),
        extract::meta_tags(page),
        extract::links(page),
        extract::images(page),
        extract::cookies(page),
        screenshot,
        extract::colors(page),
        extract::fonts(page, ctx.options.font_sample),
        enhanced,
    );

    let content = settle(stats, url, Facet::PageContent, content);
    let detected_tools = detect_tools(&ctx.taxonomy, &content);

    let mut profile = PageProfile {
        url: url.to_string(),
        engine: engine.to_string(),
        mode,
        title: settle(stats, url, Facet::Title, title),
        meta_description: settle(stats, url, Facet::MetaTags, meta_description),
        meta_tags: settle(stats, url, Facet::MetaTags, meta_tags),
        links: settle(stats, url, Facet::Links, links),
        images: settle(stats, url, Facet::Images, images),
        cookies: settle(stats, url, Facet::Cookies, cookies),
        detected_tools,
        screenshot: screenshot
            .map(|shot| settle(stats, url, Facet::Screenshot, shot.map(Some)))
            .unwrap_or_default(),
        style: StyleProfile {
            colors: settle(stats, url, Facet::Colors, colors),
            fonts: settle(stats, url, Facet::Fonts, fonts),
        },
        ..Default::default()
    };

    if let Some((
        structured,
        forms,
        headings,
        performance,
        contact,
        social,
        business,
        technical,
        content_analysis,
    )) = enhanced
    {
        profile.structured_data = Some(settle(stats, url, Facet::StructuredData, structured));
        profile.forms = Some(settle(stats, url, Facet::Forms, forms));
        profile.headings = Some(settle(stats, url, Facet::Headings, headings));
        profile.performance_metrics = Some(settle(stats, url, Facet::Performance, performance));
        profile.extracted_data = Some(ExtractedData {
            contact_info: settle(stats, url, Facet::ContactInfo, contact),
            social_links: settle(stats, url, Facet::SocialLinks, social),
            business_info: settle(stats, url, Facet::BusinessInfo, business),
            technical_details: settle(stats, url, Facet::TechnicalDetails, technical),
            content_analysis: settle(stats, url, Facet::ContentAnalysis, content_analysis),
        });
    }

    log::debug!(
        "Built {} profile for {}: {} links, {} images, {} tools",
        mode,
        url,
        profile.links.len(),
        profile.images.len(),
        profile.detected_tools.total()
    );
    profile
}

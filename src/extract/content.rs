//! Content analysis: word count, reading time, heading structure and a
//! heuristic quality score.

use crate::browser::PageHandle;
use crate::config::{
    MAX_CONTENT_SCORE, SCORE_HAS_H1, SCORE_HAS_H2, SCORE_HAS_IMAGES, SCORE_HAS_LINKS,
    SCORE_LINK_THRESHOLD, SCORE_LONG_LENGTH, SCORE_MEDIUM_LENGTH, SCORE_WORDS_LONG,
    SCORE_WORDS_MEDIUM, WORDS_PER_MINUTE,
};
use crate::models::{ContentAnalysis, HeadingStructure};

/// Inputs of the content score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSignals {
    pub word_count: usize,
    pub has_h1: bool,
    pub has_h2: bool,
    pub has_images: bool,
    pub link_count: usize,
}

/// Sums the bonus of every satisfied condition, capped at 100.
pub fn content_score(signals: &ContentSignals) -> u32 {
    let bonuses = [
        (signals.word_count > SCORE_WORDS_MEDIUM, SCORE_MEDIUM_LENGTH),
        (signals.word_count > SCORE_WORDS_LONG, SCORE_LONG_LENGTH),
        (signals.has_h1, SCORE_HAS_H1),
        (signals.has_h2, SCORE_HAS_H2),
        (signals.has_images, SCORE_HAS_IMAGES),
        (signals.link_count > SCORE_LINK_THRESHOLD, SCORE_HAS_LINKS),
    ];
    let score: u32 = bonuses
        .iter()
        .filter(|(satisfied, _)| *satisfied)
        .map(|(_, points)| points)
        .sum();
    score.min(MAX_CONTENT_SCORE)
}

/// Whitespace-separated, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

pub async fn content_analysis(page: &dyn PageHandle) -> anyhow::Result<ContentAnalysis> {
    let (text, h1, h2, h3, images, links) = tokio::try_join!(
        super::visible_text(page),
        page.query_all("h1"),
        page.query_all("h2"),
        page.query_all("h3"),
        page.query_all("img"),
        page.query_all("a[href]"),
    )?;

    let words = word_count(&text);
    let signals = ContentSignals {
        word_count: words,
        has_h1: !h1.is_empty(),
        has_h2: !h2.is_empty(),
        has_images: !images.is_empty(),
        link_count: links.len(),
    };

    Ok(ContentAnalysis {
        word_count: words,
        reading_time_minutes: reading_time_minutes(words),
        content_score: content_score(&signals),
        heading_structure: HeadingStructure::new(h1.len(), h2.len(), h3.len()),
    })
}

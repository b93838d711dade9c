//! Color and font harvesting.
//!
//! Colors come from stylesheet rules and inline `style` attributes. Fonts come
//! from `font-family` declarations in stylesheet rules plus the computed
//! family of a bounded prefix of elements. Both outputs are sorted and
//! duplicate-free.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::browser::{PageHandle, Probe};
use crate::config::GENERIC_FONT_FAMILIES;
use crate::utils::compile_regex_unsafe;

const COLOR_PATTERN: &str =
    r"(?i)#(?:[0-9a-f]{6}|[0-9a-f]{3})\b|rgba?\([^)]*\)|hsla?\([^)]*\)";
const FONT_FAMILY_PATTERN: &str = r"(?i)font-family\s*:\s*([^;}]+)";
const IMPORTANT_SUFFIX: &str = "!important";

/// CSS-wide keywords, which name no font.
const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "revert-layer"];

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(COLOR_PATTERN, "COLOR_RE"));
static FONT_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(FONT_FAMILY_PATTERN, "FONT_FAMILY_RE"));

/// Colors used by readable stylesheets and inline styles.
pub async fn colors(page: &dyn PageHandle) -> anyhow::Result<Vec<String>> {
    let (rules, inline) = tokio::try_join!(
        super::string_list(page, Probe::StylesheetRules),
        super::string_list(page, Probe::InlineStyles),
    )?;
    Ok(colors_from_css(
        rules.iter().chain(inline.iter()).map(String::as_str),
    ))
}

/// Fonts declared by readable stylesheets or computed for the first
/// `sample` elements.
pub async fn fonts(page: &dyn PageHandle, sample: usize) -> anyhow::Result<Vec<String>> {
    let (rules, computed) = tokio::try_join!(
        super::string_list(page, Probe::StylesheetRules),
        super::string_list(page, Probe::ComputedFontFamilies { limit: sample }),
    )?;
    let declared = rules.iter().flat_map(|rule| {
        FONT_FAMILY_RE
            .captures_iter(rule)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    });
    Ok(fonts_from_families(
        declared.chain(computed.iter().map(String::as_str)),
    ))
}

/// Color tokens found in CSS text, lower-cased with whitespace collapsed.
pub fn colors_from_css<'a>(sources: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let colors: BTreeSet<String> = sources
        .into_iter()
        .flat_map(|css| COLOR_RE.find_iter(css))
        .map(|m| {
            m.as_str()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    colors.into_iter().collect()
}

fn clean_font_name(raw: &str) -> Option<String> {
    let mut name = raw.trim();
    if name.len() >= IMPORTANT_SUFFIX.len()
        && name.is_char_boundary(name.len() - IMPORTANT_SUFFIX.len())
        && name[name.len() - IMPORTANT_SUFFIX.len()..].eq_ignore_ascii_case(IMPORTANT_SUFFIX)
    {
        name = name[..name.len() - IMPORTANT_SUFFIX.len()].trim_end();
    }
    let name = name.replace(['"', '\''], "");
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    let lower = lower.as_str();
    if GENERIC_FONT_FAMILIES.contains(&lower) || CSS_WIDE_KEYWORDS.contains(&lower) {
        return None;
    }
    Some(name.to_string())
}

/// Splits `font-family` values on commas and normalizes each name.
///
/// Names differing only by case are one font; the first spelling seen is kept.
pub fn fonts_from_families<'a>(families: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut fonts = Vec::new();
    for family in families {
        for name in family.split(',').filter_map(clean_font_name) {
            if seen.insert(name.to_lowercase()) {
                fonts.push(name);
            }
        }
    }
    fonts.sort();
    fonts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::StaticPage;
    use proptest::prelude::*;

    #[test]
    fn test_color_forms() {
        let colors = colors_from_css([
            "a { color: #FFF; background: #1a2B3c; }",
            "border-color: RGB(0, 0, 0); outline: rgba(0,0,0,0.5)",
            "color: hsl(120, 50%, 50%); fill: HSLA(120,50%,50%,.3); stroke: #fff",
        ]);
        assert_eq!(
            colors,
            vec![
                "#1a2b3c",
                "#fff",
                "hsl(120, 50%, 50%)",
                "hsla(120,50%,50%,.3)",
                "rgb(0, 0, 0)",
                "rgba(0,0,0,0.5)",
            ]
        );
    }

    #[test]
    fn test_hex_needs_three_or_six_digits() {
        assert!(colors_from_css(["color: #abcd"]).is_empty());
        assert!(colors_from_css(["color: #12"]).is_empty());
    }

    #[test]
    fn test_font_normalization() {
        let fonts = fonts_from_families([
            r#""Open Sans", Arial, sans-serif"#,
            "'open sans', Helvetica Neue !important",
            "serif",
            "inherit",
            "Roboto Serif, monospace",
        ]);
        assert_eq!(fonts, vec!["Arial", "Helvetica Neue", "Open Sans", "Roboto Serif"]);
    }

    #[tokio::test]
    async fn test_style_probes_on_static_page() {
        let page = StaticPage::new(
            "https://acme.test/",
            r#"<html><head><style>
                body { color: #333333; font-family: "Inter", system-ui, sans-serif; }
                h1 { color: rgb(10, 20, 30) }
            </style></head>
            <body><p style="color: #FFF; font-family: Georgia, serif">Hi</p></body></html>"#,
        );
        let colors = colors(&page).await.expect("colors");
        assert_eq!(colors, vec!["#333333", "#fff", "rgb(10, 20, 30)"]);

        let fonts = fonts(&page, 50).await.expect("fonts");
        assert_eq!(fonts, vec!["Georgia", "Inter", "system-ui"]);
    }

    proptest! {
        #[test]
        fn test_fonts_sorted_and_unique(
            names in proptest::collection::vec("[A-Za-z ]{1,12}", 0..12),
            quote in proptest::sample::select(vec!["", "'", "\""]),
        ) {
            let families: Vec<String> = names
                .iter()
                .map(|n| format!("{q}{n}{q}, {}", n.to_uppercase(), q = quote))
                .collect();
            let fonts = fonts_from_families(families.iter().map(String::as_str));
            let mut sorted = fonts.clone();
            sorted.sort();
            prop_assert_eq!(&fonts, &sorted);
            let lowered: HashSet<String> = fonts.iter().map(|f| f.to_lowercase()).collect();
            prop_assert_eq!(lowered.len(), fonts.len());
        }

        #[test]
        fn test_colors_sorted_and_unique(hexes in proptest::collection::vec("[0-9a-fA-F]{6}", 0..12)) {
            let css: Vec<String> = hexes.iter().map(|h| format!("color: #{};", h)).collect();
            let colors = colors_from_css(css.iter().map(String::as_str));
            let mut sorted = colors.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(colors, sorted);
        }
    }
}

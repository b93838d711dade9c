//! Profile data model.
//!
//! Every type serializes with camelCase keys, the shape the HTTP API returns.
//! Structs carry `#[serde(default)]` so profiles produced by a remote backend
//! deserialize even when they omit facets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::detection::DetectionResult;

/// Which extractor suite built a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Document facets, tools, style profile, cookies and screenshot.
    Basic,
    /// Everything in `Basic` plus structured data, forms, headings,
    /// performance timing and the extended facets.
    #[default]
    Enhanced,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Basic => "basic",
            ExtractionMode::Enhanced => "enhanced",
        }
    }
}

impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<meta>` element, keyed by `name` or, failing that, `property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetaTag {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// A hyperlink with its `href` resolved against the page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub rel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A cookie as reported in profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// RFC 3339 timestamp, or `"Session"` for session cookies.
    pub expires: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<String>,
}

/// Colors and fonts harvested from stylesheets, inline styles and computed
/// styles. Both lists are sorted and duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleProfile {
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Form {
    /// Absolute submission URL; the page URL when the form has no action.
    pub action: String,
    /// Lower-case method, `get` when absent or unrecognized.
    pub method: String,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Heading {
    /// 1 through 6.
    pub level: u8,
    pub text: String,
    pub id: Option<String>,
}

/// Navigation timing deltas in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub dom_content_loaded: f64,
    pub load_complete: f64,
    /// Zero when the browser recorded no first-contentful-paint entry.
    pub first_contentful_paint: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContactInfo {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
    pub addresses: BTreeSet<String>,
}

/// Social profile links bucketed by platform. A link lands in at most one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: BTreeSet<String>,
    pub twitter: BTreeSet<String>,
    pub linkedin: BTreeSet<String>,
    pub instagram: BTreeSet<String>,
    pub youtube: BTreeSet<String>,
    pub github: BTreeSet<String>,
}

impl SocialLinks {
    pub fn total(&self) -> usize {
        self.facebook.len()
            + self.twitter.len()
            + self.linkedin.len()
            + self.instagram.len()
            + self.youtube.len()
            + self.github.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessInfo {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub charset: Option<String>,
    pub viewport: Option<String>,
    pub robots_directive: Option<String>,
    pub language: Option<String>,
    pub canonical_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingStructure {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    /// Exactly one `h1` and at least one `h2`.
    pub has_proper_structure: bool,
}

impl HeadingStructure {
    pub fn new(h1_count: usize, h2_count: usize, h3_count: usize) -> Self {
        Self {
            h1_count,
            h2_count,
            h3_count,
            has_proper_structure: h1_count == 1 && h2_count > 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    /// 0 through 100.
    pub content_score: u32,
    pub heading_structure: HeadingStructure,
}

/// Extended facets, produced by the enhanced suite only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedData {
    pub contact_info: ContactInfo,
    pub social_links: SocialLinks,
    pub business_info: BusinessInfo,
    pub technical_details: TechnicalDetails,
    pub content_analysis: ContentAnalysis,
}

/// Everything observed about one page.
///
/// Enhanced-only facets are `None` in basic profiles. When an enhanced
/// extractor fails, its facet is present with an empty default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PageProfile {
    /// Page URL after redirects.
    pub url: String,
    /// Renderer that produced the page.
    pub engine: String,
    pub mode: ExtractionMode,
    pub title: String,
    pub meta_description: Option<String>,
    pub meta_tags: Vec<MetaTag>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub cookies: Vec<CookieRecord>,
    pub detected_tools: DetectionResult,
    /// `data:image/png;base64,...`, absent when capture failed or was disabled.
    pub screenshot: Option<String>,
    #[serde(flatten)]
    pub style: StyleProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<Form>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<Heading>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<PerformanceMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_structure_rule() {
        assert!(HeadingStructure::new(1, 1, 0).has_proper_structure);
        assert!(!HeadingStructure::new(0, 2, 0).has_proper_structure);
        assert!(!HeadingStructure::new(2, 3, 1).has_proper_structure);
        assert!(!HeadingStructure::new(1, 0, 4).has_proper_structure);
    }

    #[test]
    fn test_basic_profile_omits_enhanced_facets() {
        let profile = PageProfile {
            url: "https://a.test/".into(),
            mode: ExtractionMode::Basic,
            style: StyleProfile {
                colors: vec!["#fff".into()],
                fonts: vec![],
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(value["mode"], "basic");
        assert_eq!(value["colors"], json!(["#fff"]));
        assert!(value.get("extractedData").is_none());
        assert!(value.get("forms").is_none());
        assert!(value.get("metaDescription").is_some());
    }

    #[test]
    fn test_profile_accepts_partial_json() {
        let profile: PageProfile = serde_json::from_value(json!({
            "title": "Remote",
            "colors": ["#000"],
            "extractedData": { "businessInfo": { "companyName": "Acme" } }
        }))
        .expect("deserialize");
        assert_eq!(profile.title, "Remote");
        assert_eq!(profile.style.colors, vec!["#000"]);
        let extracted = profile.extracted_data.expect("extracted data");
        assert_eq!(extracted.business_info.company_name.as_deref(), Some("Acme"));
        assert_eq!(profile.detected_tools, DetectionResult::default());
    }

    #[test]
    fn test_form_input_type_key() {
        let input = FormInput {
            input_type: "email".into(),
            name: "email".into(),
            placeholder: String::new(),
            required: true,
        };
        let value = serde_json::to_value(input).expect("serialize");
        assert_eq!(value["type"], "email");
    }
}

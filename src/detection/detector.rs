//! Tool detection over raw page content.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoEnumIterator;

use super::taxonomy::{Category, Taxonomy};

/// Tools detected per category.
///
/// Every category is always present, empty when nothing matched. Names within
/// a category keep catalogue order and appear at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DetectionResult(BTreeMap<Category, Vec<String>>);

impl<'de> Deserialize<'de> for DetectionResult {
    /// Missing categories read as empty; unknown keys are skipped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut result = DetectionResult::new();
        for category in Category::iter() {
            for name in raw.remove(category.key()).unwrap_or_default() {
                result.insert(category, &name);
            }
        }
        if !raw.is_empty() {
            log::debug!(
                "Ignoring unknown tool categories: {}",
                raw.keys().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        Ok(result)
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionResult {
    /// A result with every category initialized to an empty list.
    pub fn new() -> Self {
        DetectionResult(Category::iter().map(|c| (c, Vec::new())).collect())
    }

    /// Adds `name` to `category` unless it is already there.
    pub fn insert(&mut self, category: Category, name: &str) {
        let tools = self.0.entry(category).or_default();
        if !tools.iter().any(|t| t == name) {
            tools.push(name.to_string());
        }
    }

    pub fn get(&self, category: Category) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.get(category).iter().any(|t| t == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.0.iter().map(|(c, tools)| (*c, tools.as_slice()))
    }

    /// Total number of detected tools across categories.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Confidence attached to a flat tool hit. A pattern hit is always `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

/// One detected tool in the flat, single-list form used by the SEO summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolHit {
    pub name: String,
    pub category: String,
    pub confidence: Confidence,
}

/// Classifies page content against a taxonomy.
///
/// `content` is the full HTML serialization, inline `<script>` and `<style>`
/// bodies included. Never fails: an empty taxonomy or unmatched content yields
/// all-empty categories.
pub fn detect_tools(taxonomy: &Taxonomy, content: &str) -> DetectionResult {
    let mut result = DetectionResult::new();
    for category in Category::iter() {
        for name in taxonomy.matching_in(category, content) {
            result.insert(category, name);
        }
    }
    log::debug!("Detected {} tools", result.total());
    result
}

/// Flat list of detected tools, each tagged with its category label.
pub fn detect_tool_hits(taxonomy: &Taxonomy, content: &str) -> Vec<ToolHit> {
    detect_tools(taxonomy, content)
        .iter()
        .flat_map(|(category, tools)| {
            tools.iter().map(move |name| ToolHit {
                name: name.clone(),
                category: category.label().to_string(),
                confidence: Confidence::High,
            })
        })
        .collect()
}

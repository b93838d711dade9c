//! Business info resolution.
//!
//! Each field is resolved by an ordered chain of metadata lookups; the first
//! non-empty value wins.

use std::collections::HashMap;

use crate::browser::{ElementSnapshot, PageHandle};
use crate::models::BusinessInfo;

/// First non-empty `content` per `name` and per `property` of the page's meta tags.
#[derive(Debug, Default, Clone)]
pub struct MetaIndex {
    by_name: HashMap<String, String>,
    by_property: HashMap<String, String>,
}

impl MetaIndex {
    pub fn from_snapshots(metas: &[ElementSnapshot]) -> Self {
        let mut index = MetaIndex::default();
        for meta in metas {
            let Some(content) = meta.non_empty_attr("content") else {
                continue;
            };
            if let Some(name) = meta.attr("name") {
                index
                    .by_name
                    .entry(name.to_ascii_lowercase())
                    .or_insert_with(|| content.to_string());
            }
            if let Some(property) = meta.attr("property") {
                index
                    .by_property
                    .entry(property.to_ascii_lowercase())
                    .or_insert_with(|| content.to_string());
            }
        }
        index
    }

    pub fn name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn property(&self, property: &str) -> Option<&str> {
        self.by_property.get(property).map(String::as_str)
    }
}

fn title_prefix(title: Option<&str>) -> Option<&str> {
    let prefix = title?.split('|').next()?.trim();
    (!prefix.is_empty()).then_some(prefix)
}

fn first_token(list: Option<&str>) -> Option<&str> {
    let token = list?.split(',').next()?.trim();
    (!token.is_empty()).then_some(token)
}

/// Reads business signals from metadata and the title.
pub async fn business_info(page: &dyn PageHandle) -> anyhow::Result<BusinessInfo> {
    let metas = page.query_all("meta").await?;
    let title = page.title().await?;
    Ok(business_info_from_meta(
        &MetaIndex::from_snapshots(&metas),
        title.as_deref(),
    ))
}

/// Resolves each field:
/// - company name: `og:site_name`, `application-name`, title text before the first `|`
/// - description: `description`, `og:description`
/// - industry: first comma-separated token of `keywords`
/// - location: `geo.region`, `geo.placename`
pub fn business_info_from_meta(meta: &MetaIndex, title: Option<&str>) -> BusinessInfo {
    let company_name = [
        meta.property("og:site_name"),
        meta.name("application-name"),
        title_prefix(title),
    ]
    .into_iter()
    .flatten()
    .next();

    let description = [meta.name("description"), meta.property("og:description")]
        .into_iter()
        .flatten()
        .next();

    let location = [meta.name("geo.region"), meta.name("geo.placename")]
        .into_iter()
        .flatten()
        .next();

    BusinessInfo {
        company_name: company_name.map(str::to_string),
        description: description.map(str::to_string),
        industry: first_token(meta.name("keywords")).map(str::to_string),
        location: location.map(str::to_string),
    }
}

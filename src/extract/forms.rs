//! Form inventory.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::browser::{ElementSnapshot, PageHandle};
use crate::models::{Form, FormInput};
use crate::utils::parse_selector_unsafe;

static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input", "INPUT_SELECTOR"));

const FORM_METHODS: &[&str] = &["get", "post", "dialog"];

pub async fn forms(page: &dyn PageHandle) -> anyhow::Result<Vec<Form>> {
    let snapshots = page.query_all("form").await?;
    Ok(snapshots
        .iter()
        .map(|form| form_from_snapshot(page.url(), form))
        .collect())
}

/// Builds a form from its element snapshot.
///
/// The action resolves against `page_url` (an absent action submits to the
/// page itself). Methods outside get/post/dialog read as `get`, and inputs
/// without a type read as `text`, matching how browsers reflect them.
pub fn form_from_snapshot(page_url: &str, form: &ElementSnapshot) -> Form {
    let action = match form.non_empty_attr("action") {
        Some(action) => super::resolve_url(page_url, action),
        None => page_url.to_string(),
    };

    let method = form
        .attr("method")
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| FORM_METHODS.contains(&m.as_str()))
        .unwrap_or_else(|| "get".to_string());

    Form {
        action,
        method,
        inputs: inputs_from_html(&form.inner_html),
    }
}

fn inputs_from_html(inner_html: &str) -> Vec<FormInput> {
    let fragment = Html::parse_fragment(inner_html);
    fragment
        .select(&INPUT_SELECTOR)
        .map(|input| {
            let element = input.value();
            FormInput {
                input_type: element
                    .attr("type")
                    .map(|t| t.trim().to_ascii_lowercase())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "text".to_string()),
                name: element.attr("name").unwrap_or_default().to_string(),
                placeholder: element.attr("placeholder").unwrap_or_default().to_string(),
                required: element.attr("required").is_some(),
            }
        })
        .collect()
}

//! Heading inventory, levels 1 through 6 in document order.

use crate::browser::{ElementSnapshot, PageHandle};
use crate::models::Heading;

const HEADING_SELECTOR_STR: &str = "h1, h2, h3, h4, h5, h6";

pub async fn headings(page: &dyn PageHandle) -> anyhow::Result<Vec<Heading>> {
    let snapshots = page.query_all(HEADING_SELECTOR_STR).await?;
    Ok(snapshots.iter().filter_map(heading_from_snapshot).collect())
}

/// Level comes from the tag name; `None` for anything but `h1`..`h6`.
pub fn heading_from_snapshot(element: &ElementSnapshot) -> Option<Heading> {
    let level: u8 = element
        .tag
        .strip_prefix(['h', 'H'])
        .and_then(|digit| digit.parse().ok())
        .filter(|level| (1..=6).contains(level))?;

    Some(Heading {
        level,
        text: element.text.trim().to_string(),
        id: element.non_empty_attr("id").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::StaticPage;

    #[tokio::test]
    async fn test_headings_in_document_order() {
        let page = StaticPage::new(
            "https://acme.test/",
            r#"<body><h2 id="intro"> Intro </h2><h1>Title</h1><h6 id="">Fine print</h6></body>"#,
        );
        let headings = headings(&page).await.expect("headings");
        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 2,
                    text: "Intro".into(),
                    id: Some("intro".into()),
                },
                Heading {
                    level: 1,
                    text: "Title".into(),
                    id: None,
                },
                Heading {
                    level: 6,
                    text: "Fine print".into(),
                    id: None,
                },
            ]
        );
    }

    #[test]
    fn test_non_heading_tags_rejected() {
        let header = ElementSnapshot {
            tag: "header".into(),
            ..Default::default()
        };
        assert_eq!(heading_from_snapshot(&header), None);
        let h7 = ElementSnapshot {
            tag: "h7".into(),
            ..Default::default()
        };
        assert_eq!(heading_from_snapshot(&h7), None);
    }
}

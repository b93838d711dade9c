//! Social media link extraction.
//!
//! Links are classified by hostname into exactly one platform bucket. A host
//! belongs to a platform when it equals one of the platform's domains or is a
//! subdomain of it, so `m.facebook.com` is Facebook but `notfacebook.com` is not.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use url::Url;

use crate::browser::PageHandle;
use crate::models::SocialLinks;

const ANCHOR_SELECTOR_STR: &str = "a[href]";

/// Supported platforms, in classification priority order.
///
/// A host matches a platform domain exactly or as a subdomain, never as a
/// bare substring, so `box.com` is not `x.com`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Platform {
    Facebook,
    Twitter,
    LinkedIn,
    Instagram,
    YouTube,
    GitHub,
}

impl Platform {
    fn domains(&self) -> &'static [&'static str] {
        match self {
            Platform::Facebook => &["facebook.com"],
            Platform::Twitter => &["twitter.com", "x.com"],
            Platform::LinkedIn => &["linkedin.com"],
            Platform::Instagram => &["instagram.com"],
            Platform::YouTube => &["youtube.com"],
            Platform::GitHub => &["github.com"],
        }
    }

    fn bucket_mut<'a>(&self, links: &'a mut SocialLinks) -> &'a mut BTreeSet<String> {
        match self {
            Platform::Facebook => &mut links.facebook,
            Platform::Twitter => &mut links.twitter,
            Platform::LinkedIn => &mut links.linkedin,
            Platform::Instagram => &mut links.instagram,
            Platform::YouTube => &mut links.youtube,
            Platform::GitHub => &mut links.github,
        }
    }
}

/// First platform whose domain matches the URL's host.
pub fn classify_platform(url: &Url) -> Option<Platform> {
    let host = url.host_str()?.trim_end_matches('.').to_ascii_lowercase();
    Platform::iter().find(|platform| {
        platform.domains().iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    })
}

/// Collects every hyperlink on the page and buckets social profiles.
pub async fn social_links(page: &dyn PageHandle) -> anyhow::Result<SocialLinks> {
    let anchors = page.query_all(ANCHOR_SELECTOR_STR).await?;
    let hrefs = anchors.iter().filter_map(|a| a.attr("href"));
    Ok(social_links_from_hrefs(page.url(), hrefs))
}

/// Buckets `hrefs`, resolved against `base`. Non-http(s) links are ignored.
pub fn social_links_from_hrefs<'a>(
    base: &str,
    hrefs: impl IntoIterator<Item = &'a str>,
) -> SocialLinks {
    let mut links = SocialLinks::default();
    for href in hrefs {
        let resolved = super::resolve_url(base, href);
        let Ok(url) = Url::parse(&resolved) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }
        if let Some(platform) = classify_platform(&url) {
            platform.bucket_mut(&mut links).insert(resolved);
        }
    }
    log::debug!("Found {} social links", links.total());
    links
}

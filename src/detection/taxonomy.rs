//! Tool signature taxonomy.
//!
//! A closed set of categories, each owning an ordered list of signatures. The
//! built-in catalogue is compiled once on first use; a JSON signature file can
//! replace it at startup.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;
use tokio::fs;

use crate::error_handling::InitializationError;

/// Classification bucket for third-party tools.
///
/// Declaration order is the order categories appear in detection results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIterMacro,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Analytics,
    Optimization,
    Monitoring,
    Marketing,
    Chat,
    Cms,
    Frameworks,
    Cdns,
    Payments,
    Security,
}

impl Category {
    /// Key used in serialized detection results.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Analytics => "analytics",
            Category::Optimization => "optimization",
            Category::Monitoring => "monitoring",
            Category::Marketing => "marketing",
            Category::Chat => "chat",
            Category::Cms => "cms",
            Category::Frameworks => "frameworks",
            Category::Cdns => "cdns",
            Category::Payments => "payments",
            Category::Security => "security",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Analytics => "Analytics",
            Category::Optimization => "Optimization",
            Category::Monitoring => "Monitoring",
            Category::Marketing => "Marketing",
            Category::Chat => "Chat",
            Category::Cms => "CMS",
            Category::Frameworks => "Framework",
            Category::Cdns => "CDN",
            Category::Payments => "Payments",
            Category::Security => "Security",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named tool and the patterns identifying it.
///
/// `matchers` are regular expressions matched case-insensitively against page
/// content: vendor domains, script filenames, global-variable markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSignature {
    pub name: String,
    pub category: Category,
    pub matchers: Vec<String>,
}

#[derive(Clone)]
struct CompiledSignature {
    name: String,
    category: Category,
    matchers: Vec<Regex>,
}

impl CompiledSignature {
    fn is_match(&self, content: &str) -> bool {
        self.matchers.iter().any(|re| re.is_match(content))
    }
}

/// Compiled, immutable signature catalogue.
#[derive(Clone)]
pub struct Taxonomy {
    signatures: Vec<CompiledSignature>,
}

type BuiltinEntry = (&'static str, Category, &'static [&'static str]);

#[rustfmt::skip]
const BUILTIN_SIGNATURES: &[BuiltinEntry] = &[
    // Analytics
    ("Google Analytics", Category::Analytics, &[r"google-analytics\.com", r"\bga\.js", r"/analytics\.js", r"gtag/js", r"gtag\("]),
    ("Google Tag Manager", Category::Analytics, &[r"googletagmanager\.com/gtm\.js", r"\bGTM-[A-Z0-9]{4,}"]),
    ("Facebook Pixel", Category::Analytics, &[r"connect\.facebook\.net", r"\bfbq\(", r"facebook\.com/tr"]),
    ("Hotjar", Category::Analytics, &[r"hotjar\.com", r"\bhjSettings", r"\bhjid\b"]),
    ("Mixpanel", Category::Analytics, &[r"mixpanel\.com", r"mixpanel(?:\.min)?\.js", r"cdn\.mxpnl\.com"]),
    ("Amplitude", Category::Analytics, &[r"amplitude\.com", r"amplitude\.min\.js"]),
    ("Segment", Category::Analytics, &[r"cdn\.segment\.com", r"api\.segment\.io"]),
    ("Plausible", Category::Analytics, &[r"plausible\.io/js"]),
    ("Matomo", Category::Analytics, &[r"matomo\.js", r"piwik\.js", r"\b_paq\.push"]),
    ("Heap", Category::Analytics, &[r"heapanalytics\.com", r"heap\.load\("]),
    // Optimization
    ("Optimizely", Category::Optimization, &[r"optimizely\.com", r"optimizely\.js"]),
    ("VWO", Category::Optimization, &[r"visualwebsiteoptimizer\.com", r"\b_vwo_code"]),
    ("Google Optimize", Category::Optimization, &[r"googleoptimize\.com", r"optimize\.google\.com"]),
    ("AB Tasty", Category::Optimization, &[r"abtasty\.com"]),
    ("Google PageSpeed", Category::Optimization, &[r"\bpagespeed\b", r"mod_pagespeed"]),
    ("Cloudflare Rocket Loader", Category::Optimization, &[r"rocket-loader(?:\.min)?\.js"]),
    // Monitoring
    ("Sentry", Category::Monitoring, &[r"browser\.sentry-cdn\.com", r"\bsentry\.io", r"Sentry\.init\("]),
    ("New Relic", Category::Monitoring, &[r"js-agent\.newrelic\.com", r"\bNREUM\b", r"nr-data\.net"]),
    ("Datadog RUM", Category::Monitoring, &[r"datadoghq-browser-agent", r"\bDD_RUM\b"]),
    ("LogRocket", Category::Monitoring, &[r"cdn\.logrocket\.io", r"LogRocket\.init\("]),
    ("Bugsnag", Category::Monitoring, &[r"d2wy8f7a9ursnm\.cloudfront\.net", r"\bbugsnag(?:\.min)?\.js", r"Bugsnag\.start\("]),
    // Marketing
    ("HubSpot", Category::Marketing, &[r"js\.hs-scripts\.com", r"\bhs-analytics", r"hubspot\.com"]),
    ("Mailchimp", Category::Marketing, &[r"mailchimp\.com", r"mc-embedded-subscribe-form", r"chimpstatic\.com"]),
    ("Marketo", Category::Marketing, &[r"munchkin(?:\.min)?\.js", r"\bmarketo\.(?:com|net)"]),
    ("Klaviyo", Category::Marketing, &[r"klaviyo\.com"]),
    ("ActiveCampaign", Category::Marketing, &[r"activehosted\.com", r"trackcmp\.net"]),
    // Chat
    ("Intercom", Category::Chat, &[r"widget\.intercom\.io", r"\bintercom\.io", r"\bintercomSettings"]),
    ("Drift", Category::Chat, &[r"js\.driftt\.com", r"\bdrift\.com"]),
    ("Zendesk Chat", Category::Chat, &[r"static\.zdassets\.com", r"\bzopim\b"]),
    ("LiveChat", Category::Chat, &[r"cdn\.livechatinc\.com"]),
    ("Tawk.to", Category::Chat, &[r"embed\.tawk\.to"]),
    ("Crisp", Category::Chat, &[r"client\.crisp\.chat"]),
    ("Tidio", Category::Chat, &[r"code\.tidio\.co"]),
    // CMS
    ("WordPress", Category::Cms, &[r"/wp-content/", r"/wp-includes/", r"\bwordpress\b"]),
    ("Drupal", Category::Cms, &[r"drupal\.org", r"drupal\.js", r"Drupal\.settings"]),
    ("Joomla", Category::Cms, &[r"joomla\.org", r"/media/jui/", r"\bjoomla\b"]),
    ("Wix", Category::Cms, &[r"\bwix\.com", r"wixstatic\.com"]),
    ("Squarespace", Category::Cms, &[r"squarespace\.com", r"static1\.squarespace\.com"]),
    ("Webflow", Category::Cms, &[r"\bwebflow\.com", r"data-wf-page"]),
    ("Ghost", Category::Cms, &[r"\bghost\.io", r#"content="Ghost \d"#]),
    // Frameworks
    ("React", Category::Frameworks, &[r"react\.development\.js", r"react\.production\.min\.js", r"react-dom", r"data-reactroot"]),
    ("Next.js", Category::Frameworks, &[r"/_next/static/", r"__NEXT_DATA__"]),
    ("Vue.js", Category::Frameworks, &[r"\bvue(?:\.min)?\.js", r"data-v-[0-9a-f]{8}\b"]),
    ("Nuxt.js", Category::Frameworks, &[r"/_nuxt/", r"__NUXT__"]),
    ("Angular", Category::Frameworks, &[r"angular(?:\.min)?\.js", r"\bng-version="]),
    ("jQuery", Category::Frameworks, &[r"jquery(?:\.min)?\.js", r"jquery-\d+\.\d+"]),
    ("Svelte", Category::Frameworks, &[r"\bsvelte-[a-z0-9]{5,}\b"]),
    ("Bootstrap", Category::Frameworks, &[r"bootstrap(?:\.bundle)?(?:\.min)?\.(?:css|js)"]),
    ("Tailwind CSS", Category::Frameworks, &[r"cdn\.tailwindcss\.com", r"\btailwindcss\b"]),
    // CDNs
    ("Cloudflare", Category::Cdns, &[r"cdnjs\.cloudflare\.com", r"\bcloudflare\.com", r"\bcf-cdn"]),
    ("Akamai", Category::Cdns, &[r"akamaihd\.net", r"akamaized\.net"]),
    ("Fastly", Category::Cdns, &[r"\bfastly\.net"]),
    ("jsDelivr", Category::Cdns, &[r"cdn\.jsdelivr\.net"]),
    ("unpkg", Category::Cdns, &[r"\bunpkg\.com"]),
    ("Amazon CloudFront", Category::Cdns, &[r"\bcloudfront\.net"]),
    ("Google Hosted Libraries", Category::Cdns, &[r"ajax\.googleapis\.com"]),
    // Payments
    ("Stripe", Category::Payments, &[r"js\.stripe\.com", r"\bstripe\.com", r"\bstripe\.js"]),
    ("PayPal", Category::Payments, &[r"\bpaypal\.com", r"paypalobjects\.com"]),
    ("Square", Category::Payments, &[r"squareup\.com", r"\bsquare\.js"]),
    ("Shopify", Category::Payments, &[r"cdn\.shopify\.com", r"\bshopify\.com", r"Shopify\.theme"]),
    ("Braintree", Category::Payments, &[r"braintreegateway\.com", r"js\.braintreegateway"]),
    ("Klarna", Category::Payments, &[r"\bklarna(?:cdn|services)?\.(?:com|net)"]),
    // Security
    ("Cloudflare Security", Category::Security, &[r"cloudflare\.com/security", r"\bcf-security", r"challenges\.cloudflare\.com"]),
    ("reCAPTCHA", Category::Security, &[r"\brecaptcha", r"\bgrecaptcha"]),
    ("hCaptcha", Category::Security, &[r"hcaptcha\.com", r"hcaptcha\.js"]),
    ("OneTrust", Category::Security, &[r"cdn\.cookielaw\.org", r"\bonetrust\b"]),
    ("Cookiebot", Category::Security, &[r"consent\.cookiebot\.com", r"\bCookiebot\b"]),
];

static BUILTIN: LazyLock<Taxonomy> = LazyLock::new(|| {
    Taxonomy::from_signatures(
        BUILTIN_SIGNATURES
            .iter()
            .map(|(name, category, matchers)| ToolSignature {
                name: name.to_string(),
                category: *category,
                matchers: matchers.iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
    )
});

fn compile_matcher(pattern: &str, tool: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!(
                "Skipping invalid matcher '{}' for tool '{}': {}",
                pattern,
                tool,
                e
            );
            None
        }
    }
}

impl Taxonomy {
    /// The built-in catalogue, compiled on first use.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    /// A taxonomy with no signatures. Every detection against it is all-empty.
    pub fn empty() -> Self {
        Taxonomy {
            signatures: Vec::new(),
        }
    }

    /// Compiles a list of signatures, preserving order.
    ///
    /// Matchers that fail to compile are dropped with a warning; a signature
    /// left with no matchers never matches.
    pub fn from_signatures(signatures: Vec<ToolSignature>) -> Self {
        let signatures = signatures
            .into_iter()
            .map(|sig| {
                let matchers = sig
                    .matchers
                    .iter()
                    .filter_map(|m| compile_matcher(m, &sig.name))
                    .collect();
                CompiledSignature {
                    name: sig.name,
                    category: sig.category,
                    matchers,
                }
            })
            .collect();
        Taxonomy { signatures }
    }

    /// Loads a taxonomy from a JSON file containing an array of `ToolSignature`.
    pub async fn load(path: &Path) -> Result<Self, InitializationError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            InitializationError::TaxonomyError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let signatures: Vec<ToolSignature> = serde_json::from_str(&content).map_err(|e| {
            InitializationError::TaxonomyError(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!(
            "Loaded {} tool signatures from {}",
            signatures.len(),
            path.display()
        );
        Ok(Self::from_signatures(signatures))
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Names of the signatures in `category` that match `content`, in catalogue order.
    pub(crate) fn matching_in<'a>(
        &'a self,
        category: Category,
        content: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.signatures
            .iter()
            .filter(move |sig| sig.category == category && sig.is_match(content))
            .map(|sig| sig.name.as_str())
    }
}

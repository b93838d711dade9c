//! Contact info extraction from visible text.

use std::sync::LazyLock;

use regex::Regex;

use crate::browser::PageHandle;
use crate::models::ContactInfo;
use crate::utils::compile_regex_unsafe;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
// Optional country code, then 3-3-4 digits separated by dashes, dots or spaces
const PHONE_PATTERN: &str = r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";
// US-style street address ending in a street-type token
const ADDRESS_PATTERN: &str = r"(?i)\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Circle|Cir)\b";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(EMAIL_PATTERN, "EMAIL_RE"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(PHONE_PATTERN, "PHONE_RE"));
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ADDRESS_PATTERN, "ADDRESS_RE"));

/// Extracts emails, phone numbers and street addresses from the page's visible text.
pub async fn contact_info(page: &dyn PageHandle) -> anyhow::Result<ContactInfo> {
    let text = super::visible_text(page).await?;
    Ok(contact_info_from_text(&text))
}

/// Applies the three pattern families independently.
///
/// Emails are lower-cased and addresses have their whitespace collapsed
/// before deduplication.
pub fn contact_info_from_text(text: &str) -> ContactInfo {
    let emails = EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    let phones = PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    let addresses = ADDRESS_RE
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    ContactInfo {
        emails,
        phones,
        addresses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_emails_deduplicated_case_insensitively() {
        let info = contact_info_from_text(
            "Write to Sales@Acme.com or sales@acme.com.\n  SALES@ACME.COM  anytime",
        );
        assert_eq!(info.emails.len(), 1);
        assert!(info.emails.contains("sales@acme.com"));
    }

    #[test]
    fn test_phone_formats() {
        let info = contact_info_from_text(
            "Call (555) 123-4567, +1 555.123.4567 or 555 123 4567. Again: (555) 123-4567",
        );
        assert!(info.phones.contains("(555) 123-4567"));
        assert!(info.phones.contains("+1 555.123.4567"));
        assert!(info.phones.contains("555 123 4567"));
        assert_eq!(info.phones.len(), 3);
    }

    #[test]
    fn test_addresses() {
        let info = contact_info_from_text("Visit 42 Main Street, Springfield or 7 Ocean\nDrive.");
        assert!(info.addresses.contains("42 Main Street"));
        assert!(info.addresses.contains("7 Ocean Drive"));
    }

    #[test]
    fn test_street_token_must_end_a_word() {
        let info = contact_info_from_text("We sold 3 tickets at the Stadium");
        assert!(info.addresses.is_empty());
    }

    #[test]
    fn test_no_contacts() {
        assert_eq!(
            contact_info_from_text("Nothing to see here"),
            ContactInfo::default()
        );
    }

    proptest! {
        #[test]
        fn test_emails_never_duplicate_across_case(
            local in "[a-z]{1,10}",
            domain in "[a-z]{1,10}",
            flips in proptest::collection::vec(any::<bool>(), 1..5),
        ) {
            let email = format!("{}@{}.com", local, domain);
            let text: Vec<String> = flips
                .iter()
                .map(|upper| if *upper { format!("  {}  ", email.to_uppercase()) } else { email.clone() })
                .collect();
            let info = contact_info_from_text(&text.join(" , "));
            prop_assert_eq!(info.emails.len(), 1);
        }
    }
}

// src/extract/email.rs
// =============================================================================
// This module finds email addresses in page text and in mailto: links.
//
// The matcher is deliberately simple: anything shaped like
// `local-part@domain.tld` counts. We don't try to validate addresses.
//
// Rust concepts:
// - LazyLock: Compile the regex once, on first use, and share it
// - Iterators: find_iter() walks every match in the text
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// local-part @ domain . tld (tld = 2+ letters)
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("hardcoded email pattern is valid")
});

const MAILTO: &str = "mailto:";

// Extracts every email-looking token from a block of text
//
// Returns matches in order of appearance. Duplicates are kept, the
// caller's EmailSet takes care of those.
//
// Example:
//   text = "contact a@x.com or b@x.com"
//   result = ["a@x.com", "b@x.com"]
pub fn extract_from_text(text: &str) -> Vec<String> {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// True for hrefs that carry an email action instead of a page
pub fn is_mailto(href: &str) -> bool {
    href.contains(MAILTO)
}

// Pulls the address out of a mailto: href
//
// Everything after the first ':' is taken as-is, so query parameters like
// `?subject=hi` stay attached to the address.
//
// Returns: None if the href is not a mailto link or the address is empty
pub fn extract_from_mailto(href: &str) -> Option<String> {
    if !is_mailto(href) {
        return None;
    }

    let (_, address) = href.split_once(':')?;
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_two_addresses() {
        let emails = extract_from_text("contact a@x.com or b@x.com");
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let emails = extract_from_text("a@x.com, again a@x.com");
        assert_eq!(emails.len(), 2);
    }

    #[test]
    fn test_extract_requires_alpha_tld() {
        assert!(extract_from_text("user@host.1").is_empty());
        assert!(extract_from_text("user@host.c").is_empty());
        assert!(extract_from_text("no at sign here").is_empty());
    }

    #[test]
    fn test_extract_mixed_case_and_symbols() {
        let emails = extract_from_text("Write to John.Doe+news%1@Mail-Server.Example.ORG today");
        assert_eq!(emails, vec!["John.Doe+news%1@Mail-Server.Example.ORG"]);
    }

    #[test]
    fn test_mailto_plain() {
        assert_eq!(
            extract_from_mailto("mailto:c@x.com"),
            Some("c@x.com".to_string())
        );
    }

    #[test]
    fn test_mailto_keeps_query() {
        assert_eq!(
            extract_from_mailto("mailto:a@x.com?subject=hi"),
            Some("a@x.com?subject=hi".to_string())
        );
    }

    #[test]
    fn test_mailto_empty_address() {
        assert_eq!(extract_from_mailto("mailto:"), None);
    }

    #[test]
    fn test_not_mailto() {
        assert_eq!(extract_from_mailto("https://example.com/contact"), None);
        assert_eq!(extract_from_mailto("tel:+123456"), None);
    }

    #[test]
    fn test_mailto_embedded_takes_after_first_colon() {
        // Same naive split for hrefs that only contain the scheme somewhere
        assert_eq!(
            extract_from_mailto("javascript:mailto:x@y.com"),
            Some("mailto:x@y.com".to_string())
        );
    }
}

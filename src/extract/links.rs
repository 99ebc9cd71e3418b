// src/extract/links.rs
// =============================================================================
// This module turns href values into absolute URLs and classifies them.
//
// Every link is resolved against the seed's base URL (not the page it was
// found on), then we record two facts about it:
// - same_origin: does it share scheme, host and port with the base?
// - is_image: does its path end in a known image extension?
//
// The crawler only follows links that are same-origin and not images.
//
// Rust concepts:
// - Option<T>: Malformed hrefs resolve to None and are skipped
// - url::Origin: The (scheme, host, port) tuple, with default ports filled in
// =============================================================================

use url::Url;

// Extensions we never fetch (compared case-insensitively)
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg"];

// A link after resolution against the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The absolute URL, serialized by the url crate
    pub url: String,
    /// Scheme, host and port match the base URL
    pub same_origin: bool,
    /// Path ends in an image extension
    pub is_image: bool,
}

// Resolves a possibly-relative href against the base URL
//
// Examples:
//   base = "https://example.com/"
//   href = "/docs"              -> same_origin = true
//   href = "https://other.com"  -> same_origin = false
//   href = "logo.PNG"           -> is_image = true
//   href = "http://[bad"        -> None
pub fn resolve(href: &str, base: &Url) -> Option<ResolvedLink> {
    let resolved = base.join(href).ok()?;

    Some(ResolvedLink {
        same_origin: resolved.origin() == base.origin(),
        is_image: has_image_extension(&resolved),
        url: resolved.into(),
    })
}

fn has_image_extension(url: &Url) -> bool {
    let last_segment = url.path().rsplit('/').next().unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|image_ext| ext.eq_ignore_ascii_case(image_ext)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let link = resolve("/docs", &base()).unwrap();
        assert_eq!(link.url, "https://example.com/docs");
        assert!(link.same_origin);
        assert!(!link.is_image);
    }

    #[test]
    fn test_resolve_against_base_not_page() {
        let base = Url::parse("https://example.com/section/").unwrap();
        let link = resolve("page.html", &base).unwrap();
        assert_eq!(link.url, "https://example.com/section/page.html");
    }

    #[test]
    fn test_other_host_is_not_same_origin() {
        let link = resolve("http://other-domain.com/page", &base()).unwrap();
        assert!(!link.same_origin);
    }

    #[test]
    fn test_scheme_and_port_are_part_of_origin() {
        assert!(!resolve("http://example.com/", &base()).unwrap().same_origin);
        assert!(!resolve("https://example.com:8443/", &base()).unwrap().same_origin);
        // Explicit default port is the same origin
        assert!(resolve("https://example.com:443/a", &base()).unwrap().same_origin);
    }

    #[test]
    fn test_image_extensions() {
        for href in ["image.jpg", "a/b.JPEG", "x.png", "y.Gif", "z.bmp", "icon.svg"] {
            let link = resolve(href, &base()).unwrap();
            assert!(link.is_image, "{} should be an image", href);
        }
    }

    #[test]
    fn test_image_check_ignores_query() {
        let link = resolve("/photo.jpg?size=large", &base()).unwrap();
        assert!(link.is_image);

        let link = resolve("/page?file=photo.jpg", &base()).unwrap();
        assert!(!link.is_image);
    }

    #[test]
    fn test_non_image_extensions() {
        let link = resolve("/report.pdf", &base()).unwrap();
        assert!(!link.is_image);
        let link = resolve("/jpg", &base()).unwrap();
        assert!(!link.is_image);
    }

    #[test]
    fn test_mailto_is_not_same_origin() {
        let link = resolve("mailto:a@x.com", &base()).unwrap();
        assert!(!link.same_origin);
    }

    #[test]
    fn test_malformed_href() {
        assert_eq!(resolve("http://[::1", &base()), None);
    }

    #[test]
    fn test_no_normalization_beyond_resolution() {
        let a = resolve("/docs", &base()).unwrap();
        let b = resolve("/docs/", &base()).unwrap();
        assert_ne!(a.url, b.url);
    }
}

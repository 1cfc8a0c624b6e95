//! In-page anchor links.

/// Element id an in-page link scrolls to
///
/// Only `#id` hrefs qualify. A missing href, a bare `#` and links to other
/// pages keep their default navigation.
#[must_use]
pub fn anchor_target(href: Option<&str>) -> Option<&str> {
    let id = href?.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// CSS selector matching every link handled by [`anchor_target`]
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_links() {
        assert_eq!(anchor_target(Some("#about")), Some("about"));
        assert_eq!(anchor_target(Some("#news-slider")), Some("news-slider"));
    }

    #[test]
    fn test_ignored_links() {
        assert_eq!(anchor_target(None), None);
        assert_eq!(anchor_target(Some("")), None);
        assert_eq!(anchor_target(Some("#")), None);
        assert_eq!(anchor_target(Some("/admissions#fees")), None);
        assert_eq!(anchor_target(Some("https://example.com")), None);
    }
}

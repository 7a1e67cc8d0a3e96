//! Listing URL canonicalization and marketplace item id extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Site prefixes the marketplace uses for item ids (`MLM` = Mexico,
/// `MLA` = Argentina, ...).
const SITE_PREFIXES: &str = "MLA|MLB|MLC|MLM|MLU|MLV|MCO|MCR|MEC|MPE|MPY|MPA|MRD|MBO|MGT|MHN|MNI|MSV";

static ITEM_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|[^A-Za-z0-9])((?:{SITE_PREFIXES})-?\d{{6,15}})(?:[^0-9]|$)"
    ))
    .expect("valid item id regex")
});

/// Strips the fragment (`#...`) and surrounding whitespace from a listing URL.
///
/// Query parameters are kept: some listings need them to select the seller.
#[must_use]
pub fn canonicalize_url(url: &str) -> String {
    let trimmed = url.trim();
    trimmed
        .split_once('#')
        .map_or(trimmed, |(before, _)| before)
        .to_string()
}

/// Extracts a marketplace item id such as `MLM-123456789` from a URL and
/// normalizes it to `MLM123456789`.
///
/// Returns `None` when the URL carries no recognizable id.
#[must_use]
pub fn extract_item_id(url: &str) -> Option<String> {
    let caps = ITEM_ID_RE.captures(url)?;
    let raw = caps.get(1)?.as_str();
    Some(raw.replace('-', "").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_strips_fragment() {
        assert_eq!(
            canonicalize_url("https://articulo.mercadolibre.com.mx/MLM-123456789-x#position=3"),
            "https://articulo.mercadolibre.com.mx/MLM-123456789-x"
        );
    }

    #[test]
    fn canonicalize_keeps_query_parameters() {
        assert_eq!(
            canonicalize_url("https://www.mercadolibre.com.mx/p/MLM123?pdp_filters=seller_id:42#reviews"),
            "https://www.mercadolibre.com.mx/p/MLM123?pdp_filters=seller_id:42"
        );
    }

    #[test]
    fn canonicalize_trims_whitespace() {
        assert_eq!(canonicalize_url("  https://example.com/a  "), "https://example.com/a");
    }

    #[test]
    fn canonicalize_without_fragment_is_unchanged() {
        assert_eq!(canonicalize_url("https://example.com/a?b=1"), "https://example.com/a?b=1");
    }

    #[test]
    fn extracts_hyphenated_id() {
        assert_eq!(
            extract_item_id("https://articulo.mercadolibre.com.mx/MLM-123456789-cafetera-_JM"),
            Some("MLM123456789".to_string())
        );
    }

    #[test]
    fn extracts_compact_id() {
        assert_eq!(
            extract_item_id("https://www.mercadolibre.com.mx/cafetera/p/MLM2345678901"),
            Some("MLM2345678901".to_string())
        );
    }

    #[test]
    fn extraction_is_case_insensitive() {
        assert_eq!(
            extract_item_id("https://site/mlm-123456789-x"),
            Some("MLM123456789".to_string())
        );
    }

    #[test]
    fn extracts_other_site_prefixes() {
        assert_eq!(
            extract_item_id("https://articulo.mercadolibre.com.ar/MLA-987654321-x"),
            Some("MLA987654321".to_string())
        );
    }

    #[test]
    fn rejects_too_few_digits() {
        assert_eq!(extract_item_id("https://site/MLM-12345-x"), None);
    }

    #[test]
    fn rejects_too_many_digits() {
        assert_eq!(extract_item_id("https://site/MLM-1234567890123456"), None);
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert_eq!(extract_item_id("https://site/ABC-123456789"), None);
    }

    #[test]
    fn returns_none_without_id() {
        assert_eq!(extract_item_id("https://example.com/producto"), None);
    }
}

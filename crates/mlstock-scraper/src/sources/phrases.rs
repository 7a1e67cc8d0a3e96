//! Visible-text stock phrases.
//!
//! One ordered table drives the match: negative phrases come first, so a
//! page that says both "agotado" and "stock disponible" reads as out of
//! stock.

/// Whether a phrase signals stock or its absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Negative,
    Positive,
}

/// Lowercase phrases in match order.
pub const STOCK_PHRASES: &[(Polarity, &str)] = &[
    (Polarity::Negative, "sin stock"),
    (Polarity::Negative, "no hay stock"),
    (Polarity::Negative, "agotado"),
    (Polarity::Negative, "stock no disponible"),
    (Polarity::Negative, "sin disponibilidad"),
    (Polarity::Negative, "no disponible"),
    (Polarity::Positive, "stock disponible"),
    (Polarity::Positive, "disponibilidad inmediata"),
    (Polarity::Positive, "últimas disponibles"),
    (Polarity::Positive, "disponible para envío"),
    (Polarity::Positive, "hay stock"),
    (Polarity::Positive, "+50"),
    (Polarity::Positive, "más de 50"),
];

/// Markers of a login wall or bot check rather than a product page.
pub const BLOCKED_MARKERS: &[&str] = &["inicia sesión", "captcha", "verifica"];

/// Returns the first phrase from [`STOCK_PHRASES`] contained in `text_lower`.
///
/// `text_lower` must already be lowercased.
#[must_use]
pub fn match_stock_phrase(text_lower: &str) -> Option<(Polarity, &'static str)> {
    STOCK_PHRASES
        .iter()
        .find(|(_, phrase)| text_lower.contains(phrase))
        .map(|&(polarity, phrase)| (polarity, phrase))
}

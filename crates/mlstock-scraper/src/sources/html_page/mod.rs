//! Listing page scrape: structured data first, then visible-text phrases.

mod jsonld;
mod text;

use std::time::Duration;

use mlstock_core::ListingReference;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use scraper::Html;

use super::phrases::{match_stock_phrase, Polarity, BLOCKED_MARKERS};
use super::{SignalSource, SourceFuture};
use crate::error::ScraperError;
use crate::outcome::{SourceFailure, SourceOutcome};

const LOGIN_BADGE: &str = "LOGIN";

/// Fetches the listing page with browser-like headers and reads stock from
/// its markup.
pub struct HtmlPageSource {
    client: Client,
}

impl HtmlPageSource {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-MX,es;q=0.9,en;q=0.8"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> SourceOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "page request failed");
                return SourceOutcome::from(ScraperError::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "page returned non-success status");
            return SourceOutcome::Failed(SourceFailure::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        match response.text().await {
            Ok(body) => evaluate_page(&body, content_type.as_deref()),
            Err(e) => {
                tracing::debug!(url, error = %e, "could not read page body");
                SourceOutcome::from(ScraperError::Http(e))
            }
        }
    }
}

impl SignalSource for HtmlPageSource {
    fn name(&self) -> &'static str {
        "html-page"
    }

    fn resolve<'a>(
        &'a self,
        listing: &'a ListingReference,
        _item_id: Option<&'a str>,
    ) -> SourceFuture<'a> {
        Box::pin(self.fetch(&listing.url))
    }
}

/// Classifies a fetched page body.
///
/// Decision order: non-HTML payloads are rejected, then JSON-LD offer
/// availability decides, then the visible-text phrase table, then login
/// markers (badge `LOGIN`). A page with none of these is indeterminate.
#[must_use]
pub fn evaluate_page(body: &str, content_type: Option<&str>) -> SourceOutcome {
    if is_non_html(body, content_type) {
        return SourceOutcome::Failed(SourceFailure::NonHtml);
    }

    let document = Html::parse_document(body);
    let title = text::extract_title(&document);

    if let Some((in_stock, badge)) = jsonld::offer_availability(&document) {
        return SourceOutcome::decisive(in_stock, badge, title);
    }

    let visible = text::visible_text(&document);
    if let Some((polarity, phrase)) = match_stock_phrase(&visible) {
        return SourceOutcome::decisive(polarity == Polarity::Positive, phrase, title);
    }

    if BLOCKED_MARKERS.iter().any(|marker| visible.contains(marker)) {
        return SourceOutcome::indeterminate(Some(LOGIN_BADGE), title);
    }

    SourceOutcome::indeterminate(None, title)
}

fn is_non_html(body: &str, content_type: Option<&str>) -> bool {
    if let Some(ct) = content_type {
        if ct.contains("json") || ct.contains("javascript") || ct.contains("ecmascript") {
            return true;
        }
    }

    let head = body.trim_start();
    if head.starts_with('{') || head.starts_with('[') {
        return true;
    }

    // A bare script payload: starts with <script> and never opens a document.
    let prefix: String = head.chars().take(7).collect::<String>().to_ascii_lowercase();
    if prefix == "<script" {
        let lower = body.to_ascii_lowercase();
        return !lower.contains("<html") && !lower.contains("<body");
    }

    false
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

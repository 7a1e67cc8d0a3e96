//! Ordered fallback over signal sources.
//!
//! Sources run one at a time in priority order. The first decisive answer
//! wins and later sources are never called. When no source decides, the
//! record carries the badge of the last source that actually ran.

use std::sync::Arc;

use mlstock_core::{AppConfig, InventoryRecord, ListingReference, StockSignal, StockStatus};

use crate::client::{MarketplaceClient, TokenStore};
use crate::error::ScraperError;
use crate::outcome::SourceOutcome;
use crate::sources::{HtmlPageSource, ItemApiSource, SignalSource, SkuSearchSource};
use crate::urls::{canonicalize_url, extract_item_id};

pub struct Cascade {
    sources: Vec<Box<dyn SignalSource>>,
}

impl Cascade {
    #[must_use]
    pub fn new(sources: Vec<Box<dyn SignalSource>>) -> Self {
        Self { sources }
    }

    /// Builds the production cascade:
    /// authenticated item lookup, public item lookup, SKU search, page scrape.
    ///
    /// The authenticated steps are included only when credentials are
    /// configured; SKU search additionally needs the seller user id.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if an HTTP client cannot be constructed or
    /// the API base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let api = Arc::new(MarketplaceClient::with_base_url(
            config.api_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )?);

        let tokens = config
            .credentials
            .as_ref()
            .map(|creds| {
                TokenStore::with_base_url(creds, config.api_timeout_secs, &config.api_base_url)
                    .map(Arc::new)
            })
            .transpose()?;

        let mut sources: Vec<Box<dyn SignalSource>> = Vec::new();

        if let Some(tokens) = &tokens {
            sources.push(Box::new(ItemApiSource::authenticated(
                Arc::clone(&api),
                Arc::clone(tokens),
            )));
        }

        sources.push(Box::new(ItemApiSource::public(Arc::clone(&api))));

        let user_id = config.credentials.as_ref().and_then(|c| c.user_id.as_deref());
        if let (Some(tokens), Some(user_id)) = (&tokens, user_id) {
            sources.push(Box::new(SkuSearchSource::new(
                Arc::clone(&api),
                Arc::clone(tokens),
                user_id,
            )));
        }

        sources.push(Box::new(HtmlPageSource::new(
            config.page_timeout_secs,
            &config.user_agent,
        )?));

        Ok(Self::new(sources))
    }

    /// Names of the configured sources, in the order they run.
    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Runs the sources in order until one is decisive.
    ///
    /// `listing.url` must already be canonical.
    pub async fn resolve_signal(
        &self,
        listing: &ListingReference,
        item_id: Option<&str>,
    ) -> StockSignal {
        let mut title: Option<String> = None;
        let mut last_badge: Option<String> = None;

        for source in &self.sources {
            let outcome = source.resolve(listing, item_id).await;
            tracing::debug!(
                url = %listing.url,
                source = source.name(),
                outcome = ?outcome,
                "source attempted"
            );

            if title.is_none() {
                title = outcome.title().map(str::to_string);
            }

            if !outcome.was_attempted() {
                continue;
            }

            match outcome {
                SourceOutcome::Decisive {
                    in_stock, badge, ..
                } => {
                    return StockSignal {
                        title,
                        status: StockStatus::from_in_stock(in_stock),
                        badge: Some(badge),
                    };
                }
                other => last_badge = other.badge(),
            }
        }

        StockSignal {
            title,
            status: StockStatus::Unknown,
            badge: last_badge,
        }
    }

    /// Resolves one input row into today's inventory record.
    pub async fn resolve(&self, listing: &ListingReference) -> InventoryRecord {
        let canonical = ListingReference {
            url: canonicalize_url(&listing.url),
            brand: listing.brand.clone(),
            sku: listing.sku.clone(),
        };
        let item_id = extract_item_id(&canonical.url);

        let signal = self.resolve_signal(&canonical, item_id.as_deref()).await;

        let key = if canonical.sku.is_empty() {
            item_id.unwrap_or_else(|| canonical.url.clone())
        } else {
            canonical.sku.clone()
        };
        let product = signal.title.clone().unwrap_or_else(|| key.clone());

        tracing::info!(
            key = %key,
            status = %signal.status,
            badge = signal.badge.as_deref().unwrap_or(""),
            "resolved listing"
        );

        InventoryRecord {
            key,
            product,
            brand: canonical.brand,
            status: signal.status,
            badge: signal.badge,
        }
    }
}

#[cfg(test)]
#[path = "cascade_test.rs"]
mod tests;

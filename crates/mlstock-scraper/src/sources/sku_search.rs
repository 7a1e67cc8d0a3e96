//! Seller SKU search: finds the listing's item id by SKU, then applies the
//! same item-detail rule as the direct lookups.

use std::sync::Arc;

use mlstock_core::ListingReference;

use super::item_api::outcome_from_item;
use super::{SignalSource, SourceFuture};
use crate::client::{MarketplaceClient, TokenStore};
use crate::outcome::{SourceFailure, SourceOutcome};

pub struct SkuSearchSource {
    client: Arc<MarketplaceClient>,
    tokens: Arc<TokenStore>,
    user_id: String,
}

impl SkuSearchSource {
    #[must_use]
    pub fn new(client: Arc<MarketplaceClient>, tokens: Arc<TokenStore>, user_id: &str) -> Self {
        Self {
            client,
            tokens,
            user_id: user_id.to_string(),
        }
    }

    async fn search(&self, sku: &str) -> SourceOutcome {
        let token = match self.tokens.access_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(sku, error = %e, "could not obtain access token; skipping sku search");
                return SourceOutcome::Failed(SourceFailure::Credentials);
            }
        };

        let item_ids = match self
            .client
            .search_items_by_sku(&self.user_id, sku, &token)
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!(sku, error = %e, "sku search failed");
                return SourceOutcome::from(e);
            }
        };

        let Some(item_id) = item_ids.first() else {
            tracing::debug!(sku, "sku search returned no items");
            return SourceOutcome::indeterminate(None, None);
        };

        match self.client.get_item(item_id, Some(&token)).await {
            Ok(item) => outcome_from_item(&item),
            Err(e) => {
                tracing::debug!(sku, item_id = %item_id, error = %e, "item lookup after sku search failed");
                SourceOutcome::from(e)
            }
        }
    }
}

impl SignalSource for SkuSearchSource {
    fn name(&self) -> &'static str {
        "sku-search"
    }

    fn resolve<'a>(
        &'a self,
        listing: &'a ListingReference,
        _item_id: Option<&'a str>,
    ) -> SourceFuture<'a> {
        Box::pin(async move {
            if listing.sku.is_empty() {
                return SourceOutcome::Failed(SourceFailure::NotApplicable);
            }
            self.search(&listing.sku).await
        })
    }
}

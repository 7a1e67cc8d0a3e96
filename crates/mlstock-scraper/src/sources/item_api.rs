//! Item-detail lookups against the marketplace API.

use std::sync::Arc;

use mlstock_core::ListingReference;

use super::{SignalSource, SourceFuture};
use crate::client::{MarketplaceClient, TokenStore};
use crate::outcome::{SourceFailure, SourceOutcome};
use crate::types::ItemDetail;

const QUANTITY_BADGE: &str = "api:available_quantity";
const STATUS_BADGE: &str = "api:status";

/// Applies the stock rule to an item payload.
///
/// `available_quantity` decides when present. Without it, a `closed` or
/// `paused` publication counts as out of stock; anything else, `active`
/// included, stays indeterminate rather than guessing availability.
#[must_use]
pub fn outcome_from_item(item: &ItemDetail) -> SourceOutcome {
    let title = item
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    if let Some(quantity) = item.available_quantity {
        return SourceOutcome::decisive(quantity > 0, QUANTITY_BADGE, title);
    }

    let status = item.status.as_deref().unwrap_or_default().to_lowercase();
    if matches!(status.as_str(), "closed" | "paused") {
        return SourceOutcome::decisive(false, STATUS_BADGE, title);
    }

    SourceOutcome::indeterminate(None, title)
}

/// Looks up the item id found in the listing URL.
///
/// Built either with a [`TokenStore`] (authenticated, sends a bearer token)
/// or without one (public, anonymous call that avoids token overhead).
pub struct ItemApiSource {
    client: Arc<MarketplaceClient>,
    tokens: Option<Arc<TokenStore>>,
}

impl ItemApiSource {
    #[must_use]
    pub fn authenticated(client: Arc<MarketplaceClient>, tokens: Arc<TokenStore>) -> Self {
        Self {
            client,
            tokens: Some(tokens),
        }
    }

    #[must_use]
    pub fn public(client: Arc<MarketplaceClient>) -> Self {
        Self {
            client,
            tokens: None,
        }
    }

    async fn lookup(&self, item_id: &str) -> SourceOutcome {
        let access_token = match &self.tokens {
            Some(tokens) => match tokens.access_token().await {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::warn!(
                        item_id,
                        error = %e,
                        "could not obtain access token; skipping authenticated lookup"
                    );
                    return SourceOutcome::Failed(SourceFailure::Credentials);
                }
            },
            None => None,
        };

        match self.client.get_item(item_id, access_token.as_deref()).await {
            Ok(item) => outcome_from_item(&item),
            Err(e) => {
                tracing::debug!(source = self.name(), item_id, error = %e, "item lookup failed");
                SourceOutcome::from(e)
            }
        }
    }
}

impl SignalSource for ItemApiSource {
    fn name(&self) -> &'static str {
        if self.tokens.is_some() {
            "authenticated-item"
        } else {
            "public-item"
        }
    }

    fn resolve<'a>(
        &'a self,
        _listing: &'a ListingReference,
        item_id: Option<&'a str>,
    ) -> SourceFuture<'a> {
        Box::pin(async move {
            match item_id {
                Some(item_id) => self.lookup(item_id).await,
                None => SourceOutcome::Failed(SourceFailure::NotApplicable),
            }
        })
    }
}

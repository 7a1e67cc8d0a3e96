//! Stock signal sources tried by the resolution cascade.

mod html_page;
mod item_api;
mod phrases;
mod sku_search;

use std::future::Future;
use std::pin::Pin;

use mlstock_core::ListingReference;

use crate::outcome::SourceOutcome;

pub use html_page::{evaluate_page, HtmlPageSource};
pub use item_api::{outcome_from_item, ItemApiSource};
pub use phrases::{match_stock_phrase, Polarity, BLOCKED_MARKERS, STOCK_PHRASES};
pub use sku_search::SkuSearchSource;

/// Boxed future returned by [`SignalSource::resolve`].
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = SourceOutcome> + Send + 'a>>;

/// One strategy for deciding whether a listing has stock.
///
/// `listing.url` is already canonical and `item_id` is the identifier
/// extracted from it, if any. Implementations must not panic and never
/// report errors other than through [`SourceOutcome::Failed`].
pub trait SignalSource: Send + Sync {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    fn resolve<'a>(
        &'a self,
        listing: &'a ListingReference,
        item_id: Option<&'a str>,
    ) -> SourceFuture<'a>;
}

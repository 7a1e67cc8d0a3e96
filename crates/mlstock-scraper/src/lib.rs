//! Stock resolution for marketplace listings.
//!
//! A [`Cascade`] tries the marketplace API (authenticated, then public,
//! then by seller SKU) and finally scrapes the listing page, stopping at
//! the first source that gives a definite answer.

pub mod cascade;
pub mod client;
pub mod error;
pub mod outcome;
pub mod sources;
pub mod types;
pub mod urls;

pub use cascade::Cascade;
pub use client::{MarketplaceClient, TokenStore};
pub use error::ScraperError;
pub use outcome::{SourceFailure, SourceOutcome};
pub use sources::{HtmlPageSource, ItemApiSource, SignalSource, SkuSearchSource, SourceFuture};
pub use types::{ItemDetail, SkuSearchResponse};
pub use urls::{canonicalize_url, extract_item_id};

//! Wire types for the marketplace REST API.

use serde::Deserialize;

/// Item detail as returned by `GET /items/{id}`.
///
/// Only the fields the stock decision needs are modelled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Units available for purchase. Absent for some catalog listings.
    #[serde(default)]
    pub available_quantity: Option<i64>,
    /// Publication status: `"active"`, `"paused"`, `"closed"`, ...
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /users/{user_id}/items/search?sku=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkuSearchResponse {
    /// Matching item ids, best match first.
    #[serde(default)]
    pub results: Vec<String>,
}

/// Response of the OAuth refresh-token exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub(crate) expires_in: Option<u64>,
}

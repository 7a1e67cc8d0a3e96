//! HTTP client for the marketplace REST API.

mod token;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::types::{ItemDetail, SkuSearchResponse};

pub use token::TokenStore;

/// Client for the item and seller-search endpoints.
///
/// The same client serves authenticated and anonymous calls; the caller
/// decides whether to pass an access token.
pub struct MarketplaceClient {
    client: Client,
    base_url: Url,
}

impl MarketplaceClient {
    /// Creates a client rooted at `base_url` (the production API, or a
    /// wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches one item's detail. Sends a bearer token when `access_token`
    /// is given, otherwise calls the endpoint anonymously.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network failure or timeout.
    /// - [`ScraperError::Deserialize`] if the body is not an item payload.
    pub async fn get_item(
        &self,
        item_id: &str,
        access_token: Option<&str>,
    ) -> Result<ItemDetail, ScraperError> {
        let url = self.endpoint(&["items", item_id])?;
        self.get_json(url, access_token, &format!("item {item_id}"))
            .await
    }

    /// Searches a seller's items by SKU and returns the matching item ids.
    ///
    /// # Errors
    ///
    /// Same as [`MarketplaceClient::get_item`].
    pub async fn search_items_by_sku(
        &self,
        user_id: &str,
        sku: &str,
        access_token: &str,
    ) -> Result<Vec<String>, ScraperError> {
        let mut url = self.endpoint(&["users", user_id, "items", "search"])?;
        url.query_pairs_mut().append_pair("sku", sku);
        let response: SkuSearchResponse = self
            .get_json(url, Some(access_token), &format!("sku search {sku}"))
            .await?;
        Ok(response.results)
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ScraperError> {
        endpoint(&self.base_url, segments)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        access_token: Option<&str>,
        context: &str,
    ) -> Result<T, ScraperError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Parses `base_url`, normalising it to end with exactly one slash so that
/// path segments are appended rather than replacing the last one.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Appends percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ScraperError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ScraperError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

//! OAuth access-token cache for the authenticated API.

use std::time::{Duration, Instant};

use mlstock_core::MarketplaceCredentials;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::error::ScraperError;
use crate::types::TokenResponse;

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3000;
/// Tokens are refreshed this long before the server-reported expiry.
const EXPIRY_MARGIN_SECS: u64 = 60;

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Owns the OAuth client credentials and the current access token.
///
/// The token is fetched lazily on first use and refreshed through the
/// refresh-token grant once its monotonic expiry passes. The cache sits
/// behind an async mutex, so concurrent callers share a single refresh.
pub struct TokenStore {
    client: Client,
    token_url: Url,
    app_id: String,
    app_secret: String,
    refresh_token: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenStore {
    /// Creates a store that exchanges tokens at `{base_url}/oauth/token`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        credentials: &MarketplaceCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let token_url = super::endpoint(&super::parse_base_url(base_url)?, &["oauth", "token"])?;

        Ok(Self {
            client,
            token_url,
            app_id: credentials.app_id.clone(),
            app_secret: credentials.app_secret.clone(),
            refresh_token: credentials.refresh_token.clone(),
            cached: Mutex::new(None),
        })
    }

    /// Returns a valid access token, refreshing it first if none is cached
    /// or the cached one has expired.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Credentials`] if the token exchange is
    /// rejected or its response cannot be read, and [`ScraperError::Http`]
    /// on network failure.
    pub async fn access_token(&self) -> Result<String, ScraperError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
            tracing::debug!("access token expired, refreshing");
        }

        let fresh = self.exchange_refresh_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn exchange_refresh_token(&self) -> Result<CachedToken, ScraperError> {
        let response = self
            .client
            .post(self.token_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScraperError::Credentials(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ScraperError::Credentials(format!("token parse error: {e}")))?;

        let lifetime = token
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        tracing::debug!(lifetime_secs = lifetime, "refreshed marketplace access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }
}

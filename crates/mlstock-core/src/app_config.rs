use std::path::PathBuf;

/// OAuth client credentials for the authenticated marketplace API.
///
/// Present only when the app id, app secret and refresh token are all set.
#[derive(Clone)]
pub struct MarketplaceCredentials {
    pub app_id: String,
    pub app_secret: String,
    pub refresh_token: String,
    /// Seller account id; the SKU search endpoint is scoped to it.
    pub user_id: Option<String>,
}

impl std::fmt::Debug for MarketplaceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listings_path: PathBuf,
    pub reports_dir: PathBuf,
    pub log_level: String,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub page_timeout_secs: u64,
    pub user_agent: String,
    pub credentials: Option<MarketplaceCredentials>,
}

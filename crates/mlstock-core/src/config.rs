use crate::app_config::{AppConfig, MarketplaceCredentials};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Blank values count as unset so an empty line in `.env` does not
    // half-configure the credentials.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let listings_path = PathBuf::from(or_default("MLSTOCK_LISTINGS_PATH", "config/urls.csv"));
    let reports_dir = PathBuf::from(or_default("MLSTOCK_REPORTS_DIR", "reports"));
    let log_level = or_default("MLSTOCK_LOG_LEVEL", "info");
    let api_base_url = or_default("MLSTOCK_API_BASE_URL", "https://api.mercadolibre.com");
    let api_timeout_secs = parse_u64("MLSTOCK_API_TIMEOUT_SECS", "20")?;
    let page_timeout_secs = parse_u64("MLSTOCK_PAGE_TIMEOUT_SECS", "25")?;
    let user_agent = or_default("MLSTOCK_USER_AGENT", DEFAULT_USER_AGENT);

    let credentials = match (
        optional("ML_APP_ID"),
        optional("ML_APP_SECRET"),
        optional("ML_REFRESH_TOKEN"),
    ) {
        (Some(app_id), Some(app_secret), Some(refresh_token)) => Some(MarketplaceCredentials {
            app_id,
            app_secret,
            refresh_token,
            user_id: optional("ML_USER_ID"),
        }),
        (None, None, None) => None,
        _ => {
            tracing::warn!(
                "marketplace credentials are partially configured; ML_APP_ID, ML_APP_SECRET and ML_REFRESH_TOKEN are all required, authenticated lookups disabled"
            );
            None
        }
    };

    Ok(AppConfig {
        listings_path,
        reports_dir,
        log_level,
        api_base_url,
        api_timeout_secs,
        page_timeout_secs,
        user_agent,
        credentials,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

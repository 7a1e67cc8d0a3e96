//! Shared domain types and configuration for the `mlstock` stock audit.

pub mod app_config;
pub mod config;
pub mod inventory;
pub mod listings;

use thiserror::Error;

pub use app_config::{AppConfig, MarketplaceCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use inventory::{InventoryRecord, ListingReference, StockSignal, StockStatus};
pub use listings::{load_listings, parse_listings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read listings file {path}: {source}")]
    ListingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse listings file: {0}")]
    ListingsFileParse(#[from] csv::Error),
}

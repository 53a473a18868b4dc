//! Error Types for Market Data

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Market API returned status {0}")]
    Status(u16),

    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    #[error("Asset not supported: {0}")]
    UnsupportedAsset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

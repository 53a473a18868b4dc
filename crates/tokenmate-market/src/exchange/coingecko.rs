//! CoinGecko Client
//!
//! Simple-price endpoint: `GET /simple/price?ids=<id>&vs_currencies=usd&include_24hr_change=true`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Deserializer};

use super::MarketDataClient;
use crate::error::{MarketError, Result};
use crate::model::MarketSnapshot;

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a demo-plan API key
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Clone, Debug)]
pub struct CoinGeckoConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Optional API key
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout_secs: 5,
        }
    }
}

impl CoinGeckoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            base_url: lookup("COINGECKO_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_key: lookup("COINGECKO_API_KEY").filter(|k| !k.trim().is_empty()),
            timeout_secs: lookup("COINGECKO_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// One entry of the simple-price response.
///
/// Fields that are missing or not numbers read as `None`.
#[derive(Debug, Default, Deserialize)]
struct SimplePrice {
    #[serde(default, deserialize_with = "lenient_number")]
    usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    usd_24h_change: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// CoinGecko market-data client
pub struct CoinGeckoClient {
    client: reqwest::Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(CoinGeckoConfig::from_env())
    }

    fn simple_price_url(&self) -> String {
        format!("{}/simple/price", self.config.base_url)
    }

    /// Pick `asset_id` out of a simple-price body.
    fn parse_snapshot(body: &str, asset_id: &str) -> Result<MarketSnapshot> {
        let mut prices: HashMap<String, SimplePrice> = serde_json::from_str(body)?;
        let quote = prices.remove(asset_id).unwrap_or_default();

        Ok(MarketSnapshot {
            price: quote.usd,
            change_24h: quote.usd_24h_change,
        })
    }
}

#[async_trait]
impl MarketDataClient for CoinGeckoClient {
    async fn get_snapshot(&self, asset_id: &str) -> Result<MarketSnapshot> {
        let mut request = self
            .client
            .get(self.simple_price_url())
            .query(&[
                ("ids", asset_id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let snapshot = Self::parse_snapshot(&body, asset_id)?;

        tracing::debug!(
            asset = asset_id,
            price = ?snapshot.price,
            change_24h = ?snapshot.change_24h,
            "Fetched market snapshot"
        );

        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

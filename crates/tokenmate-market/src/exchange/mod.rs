//! Market Data Integration
//!
//! Abstractions and implementations for market-data APIs.

mod coingecko;
mod mock;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig};
pub use mock::MockMarketClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MarketSnapshot;

/// Market-data client trait (Strategy pattern)
///
/// Implement this for each data source: CoinGecko, an exchange, a cache.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Current USD price and 24h change for a canonical asset id
    async fn get_snapshot(&self, asset_id: &str) -> Result<MarketSnapshot>;

    /// Client name
    fn name(&self) -> &str;
}

//! Mock Market Client
//!
//! For testing and offline demos. Returns static snapshots and counts calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::MarketDataClient;
use crate::error::{MarketError, Result};
use crate::model::MarketSnapshot;

/// Mock client with static snapshots
pub struct MockMarketClient {
    snapshots: HashMap<String, MarketSnapshot>,
    fail: bool,
    calls: AtomicUsize,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    /// Client preloaded with realistic demo quotes
    pub fn new() -> Self {
        Self::empty()
            .with_snapshot("bitcoin", MarketSnapshot::new(97_500.0, 2.5))
            .with_snapshot("ethereum", MarketSnapshot::new(3_450.0, 1.8))
            .with_snapshot("solana", MarketSnapshot::new(195.0, 4.2))
            .with_snapshot("ripple", MarketSnapshot::new(2.35, 0.9))
            .with_snapshot("cardano", MarketSnapshot::new(0.95, -1.2))
            .with_snapshot("dogecoin", MarketSnapshot::new(0.38, 12.0))
            .with_snapshot("binancecoin", MarketSnapshot::new(705.0, 0.4))
    }

    /// Client that knows no assets
    pub fn empty() -> Self {
        Self {
            snapshots: HashMap::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Client whose every call fails like a network outage
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    #[must_use]
    pub fn with_snapshot(mut self, asset_id: impl Into<String>, snapshot: MarketSnapshot) -> Self {
        self.snapshots.insert(asset_id.into(), snapshot);
        self
    }

    /// Number of `get_snapshot` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataClient for MockMarketClient {
    async fn get_snapshot(&self, asset_id: &str) -> Result<MarketSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(MarketError::PriceUnavailable(asset_id.to_string()));
        }

        self.snapshots
            .get(asset_id)
            .copied()
            .ok_or_else(|| MarketError::UnsupportedAsset(asset_id.to_string()))
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

//! Market Data Model

use serde::{Deserialize, Serialize};

/// Spot quote for one asset, fetched per request and never stored
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Spot price in USD
    pub price: Option<f64>,

    /// 24h change in percent
    pub change_24h: Option<f64>,
}

impl MarketSnapshot {
    pub const fn new(price: f64, change_24h: f64) -> Self {
        Self {
            price: Some(price),
            change_24h: Some(change_24h),
        }
    }

    /// Usable price, if any
    pub fn price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite())
    }

    /// Usable 24h change, if any
    pub fn change_24h(&self) -> Option<f64> {
        self.change_24h.filter(|c| c.is_finite())
    }
}

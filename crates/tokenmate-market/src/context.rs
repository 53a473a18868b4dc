//! Market Context Source
//!
//! Plugs live prices into the core pipeline as a `ContextSource`.

use std::sync::Arc;

use async_trait::async_trait;
use tokenmate_core::{ChatError, ContextSource, Result as CoreResult};

use crate::alias::detect_asset;
use crate::exchange::MarketDataClient;
use crate::format::{PriceFormatter, UsdFormatter};
use crate::model::MarketSnapshot;

/// Render the one-line market context, or `None` without a usable price.
pub fn market_context_line(
    asset_id: &str,
    snapshot: &MarketSnapshot,
    formatter: &dyn PriceFormatter,
) -> Option<String> {
    let price = snapshot.price()?;
    let change = snapshot
        .change_24h()
        .map(|c| format!(" (24h: {}%)", formatter.format_change(c)))
        .unwrap_or_default();

    Some(format!(
        "Live price (USD) for {asset_id}: ${}{change}.",
        formatter.format_price(price)
    ))
}

/// Detects the asset in a message and fetches its live quote
pub struct MarketContextSource {
    client: Arc<dyn MarketDataClient>,
    formatter: Arc<dyn PriceFormatter>,
}

impl MarketContextSource {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self::with_formatter(client, Arc::new(UsdFormatter))
    }

    pub fn with_formatter(
        client: Arc<dyn MarketDataClient>,
        formatter: Arc<dyn PriceFormatter>,
    ) -> Self {
        Self { client, formatter }
    }
}

#[async_trait]
impl ContextSource for MarketContextSource {
    fn name(&self) -> &str {
        "market"
    }

    async fn context_for(&self, message: &str) -> CoreResult<Option<String>> {
        let Some(asset_id) = detect_asset(message) else {
            return Ok(None);
        };

        let snapshot = self
            .client
            .get_snapshot(asset_id)
            .await
            .map_err(|e| ChatError::Context(format!("{}: {e}", self.client.name())))?;

        let line = market_context_line(asset_id, &snapshot, self.formatter.as_ref());
        if line.is_none() {
            tracing::debug!(asset = asset_id, "No usable price in market snapshot");
        }
        Ok(line)
    }
}

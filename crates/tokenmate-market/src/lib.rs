//! # tokenmate-market
//!
//! Live market context for crypto questions.
//!
//! ```text
//! "What's the price of ETH?"
//!        │
//!        ▼  alias table (first declared alias wins)
//!    ethereum
//!        │
//!        ▼  MarketDataClient (CoinGecko)
//!    { usd: 2500.5, usd_24h_change: -1.23 }
//!        │
//!        ▼  PriceFormatter
//!    "Live price (USD) for ethereum: $2,500.5 (24h: -1.23%)."
//! ```
//!
//! `MarketContextSource` wires these steps into the core pipeline as a
//! `ContextSource`. Any failure along the way means "no context".

pub mod alias;
pub mod context;
pub mod error;
pub mod exchange;
pub mod format;
pub mod model;

pub use alias::{COIN_ALIASES, detect_asset};
pub use context::{MarketContextSource, market_context_line};
pub use error::{MarketError, Result};
pub use exchange::{CoinGeckoClient, CoinGeckoConfig, MarketDataClient, MockMarketClient};
pub use format::{PriceFormatter, UsdFormatter};
pub use model::MarketSnapshot;

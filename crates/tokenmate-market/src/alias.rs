//! Asset Alias Table
//!
//! Maps what users type to CoinGecko asset ids. Order matters: detection
//! scans top to bottom and the first alias found anywhere in the message wins.

/// Lowercase alias → canonical asset id, in detection order
pub const COIN_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("bitcoin", "bitcoin"),
    ("eth", "ethereum"),
    ("ethereum", "ethereum"),
    ("sol", "solana"),
    ("solana", "solana"),
    ("xrp", "ripple"),
    ("ripple", "ripple"),
    ("ada", "cardano"),
    ("cardano", "cardano"),
    ("doge", "dogecoin"),
    ("dogecoin", "dogecoin"),
    ("bnb", "binancecoin"),
    ("binance coin", "binancecoin"),
];

/// Detect the asset a message mentions using the built-in table.
pub fn detect_asset(message: &str) -> Option<&'static str> {
    detect_asset_in(COIN_ALIASES, message)
}

/// Detect using a custom table.
///
/// Matching is plain substring search on the lowercased message, so "sol"
/// also matches inside "console".
pub fn detect_asset_in<'a>(table: &[(&str, &'a str)], message: &str) -> Option<&'a str> {
    let text = message.to_lowercase();
    table
        .iter()
        .find(|(alias, _)| text.contains(alias))
        .map(|(_, id)| *id)
}

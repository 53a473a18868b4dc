//! Price Formatting
//!
//! Presentation of prices and percentage changes in the market context line.
//! Swap the formatter to change locale conventions.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders numbers for the market context line
pub trait PriceFormatter: Send + Sync {
    /// Spot price, without currency symbol
    fn format_price(&self, price: f64) -> String;

    /// 24h change in percent, without percent sign
    fn format_change(&self, change: f64) -> String;
}

/// US English conventions: `2,500.5` and `-1.23`
///
/// Prices keep at most three fraction digits with comma thousands
/// separators, rounding the shortest decimal form of the price. Changes
/// always show two decimals, rounded on the exact binary value. Ties round
/// away from zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsdFormatter;

impl UsdFormatter {
    /// Fraction digits kept on prices
    pub const PRICE_DECIMALS: u32 = 3;

    /// Fraction digits shown on changes
    pub const CHANGE_DECIMALS: u32 = 2;
}

impl PriceFormatter for UsdFormatter {
    fn format_price(&self, price: f64) -> String {
        let Some(value) = price
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_f64_retain(price))
        else {
            return price.to_string();
        };

        let rounded = value
            .round_dp_with_strategy(Self::PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        group_thousands(&rounded.to_string())
    }

    fn format_change(&self, change: f64) -> String {
        let Some(value) = Decimal::from_f64_retain(change) else {
            return format!("{change:.2}");
        };

        let mut rounded = value
            .round_dp_with_strategy(Self::CHANGE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::CHANGE_DECIMALS);
        rounded.to_string()
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = number
        .strip_prefix('-')
        .map_or(("", number), |rest| ("-", rest));
    let (integer, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

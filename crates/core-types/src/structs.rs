use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A short uppercase ticker such as `"BTC"`, used as a map key throughout.
pub type AssetSymbol = String;

/// Ranking data keyed by base asset symbol, produced by merging losers and gainers.
pub type MergedRanking = HashMap<AssetSymbol, AssetRanking>;

/// Normalizes user input into an `AssetSymbol` (trimmed, uppercased, alphanumeric).
pub fn parse_asset_symbol(input: &str) -> Result<AssetSymbol, CoreError> {
    let symbol = input.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(CoreError::InvalidInput(
            "asset symbol".to_string(),
            "must not be empty".to_string(),
        ));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::InvalidInput(
            "asset symbol".to_string(),
            format!("'{}' contains non-alphanumeric characters", input),
        ));
    }
    Ok(symbol)
}

/// One row of the exchange's top losers / top gainers list.
///
/// `pair` is the compound market name, e.g. `"BTC_USDT"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub pair: String,
    pub last_price: f64,
    pub percent_change: f64,
}

/// A `RankingEntry` with the `pair` stripped off; the key lives in the map instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRanking {
    pub last_price: f64,
    pub percent_change: f64,
}

impl From<&RankingEntry> for AssetRanking {
    fn from(entry: &RankingEntry) -> Self {
        Self {
            last_price: entry.last_price,
            percent_change: entry.percent_change,
        }
    }
}

/// The raw losers/gainers payload as delivered by the data source.
/// Either list may be missing, in which case it is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LosersGainers {
    #[serde(default)]
    pub losers: Vec<RankingEntry>,
    #[serde(default)]
    pub gainers: Vec<RankingEntry>,
}

/// Latest price and 24h volume for a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub price: f64,
    pub volume: f64,
}

/// A single daily candle used for the asset detail chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Close
    pub c: f64,
    /// High
    pub h: f64,
    /// Low
    pub l: f64,
    /// Open
    pub o: f64,
    /// Open time (ms since epoch)
    pub t: i64,
    /// Volume
    pub v: f64,
}

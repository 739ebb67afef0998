use crate::state::CryptoDotComState;
use core_types::{MergedRanking, transform_losers_gainers};
use serde::Serialize;

/// Everything the widget can show for one asset. Each field is absent until the
/// matching data has arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    pub price: Option<f64>,
    pub volume: Option<f64>,
    pub percent_change: Option<f64>,
}

/// Losers and gainers merged into one table, computed on read.
pub fn merged_rankings(state: &CryptoDotComState) -> MergedRanking {
    transform_losers_gainers(&state.losers_gainers)
}

pub fn asset_quote(state: &CryptoDotComState, symbol: &str) -> AssetQuote {
    quote_from(state, &merged_rankings(state), symbol)
}

/// Quotes for the given assets in the order asked for.
pub fn top_movers<S: AsRef<str>>(state: &CryptoDotComState, symbols: &[S]) -> Vec<(String, AssetQuote)> {
    let rankings = merged_rankings(state);
    symbols
        .iter()
        .map(|symbol| {
            let symbol = symbol.as_ref();
            (symbol.to_string(), quote_from(state, &rankings, symbol))
        })
        .collect()
}

fn quote_from(state: &CryptoDotComState, rankings: &MergedRanking, symbol: &str) -> AssetQuote {
    let ticker = state.ticker_prices.get(symbol);
    AssetQuote {
        price: ticker.map(|t| t.price),
        volume: ticker.map(|t| t.volume),
        percent_change: rankings.get(symbol).map(|r| r.percent_change),
    }
}

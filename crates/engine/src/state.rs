use core_types::{AssetSymbol, ChartDataPoint, LosersGainers, TickerPrice};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// State of the crypto.com widget.
///
/// Collections sit behind `Arc` so a new snapshot only copies what an action touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoDotComState {
    pub opt_in_total: bool,
    #[serde(rename = "optInBTCPrice")]
    pub opt_in_btc_price: bool,
    pub ticker_prices: Arc<HashMap<AssetSymbol, TickerPrice>>,
    /// Raw payload as received; merge it with `selectors::merged_rankings`.
    pub losers_gainers: Arc<LosersGainers>,
    pub charts: Arc<HashMap<AssetSymbol, Vec<ChartDataPoint>>>,
}

/// State of the Binance widget. Only the deposit QR codes live here for now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceState {
    /// `data:image/png;base64,...` sources keyed by asset.
    pub deposit_qr_codes: Arc<HashMap<AssetSymbol, String>>,
}

/// The whole new-tab page state. Replaced, never mutated, on every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTabState {
    pub crypto_dot_com_state: Arc<CryptoDotComState>,
    pub binance_state: Arc<BinanceState>,
}

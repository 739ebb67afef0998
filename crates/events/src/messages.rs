use crate::error::EventsError;
use core_types::{AssetSymbol, ChartDataPoint, LosersGainers, TickerPrice};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Every action the new-tab page store understands.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute mirrors the shape the
/// page's dispatcher already uses, so an opt-in action looks like
/// `{ "type": "ON_BTC_PRICE_OPT_IN" }` and a price update looks like
/// `{ "type": "SET_TICKER_PRICES", "payload": { "BTC": { "price": 1.0, "volume": 2.0 } } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// The user agreed to see the total balance in USD.
    OnTotalPriceOptIn,
    /// The user agreed to see the BTC price on the index view.
    OnBtcPriceOptIn,
    /// Fresh ticker prices; merged into the existing table.
    SetTickerPrices(HashMap<AssetSymbol, TickerPrice>),
    /// Raw top losers / top gainers lists; replaces the stored payload.
    SetLosersGainers(LosersGainers),
    /// Daily candles for the asset detail chart, keyed by asset.
    SetAssetCharts(HashMap<AssetSymbol, Vec<ChartDataPoint>>),
    /// A rendered deposit QR code (`data:image/png;base64,...`) for an asset.
    SetDepositQrCodeSrc { asset: AssetSymbol, src: String },
    /// An action meant for some other part of the page. Carries its type string.
    #[serde(skip)]
    Unrecognized(String),
}

/// Type strings of the actions this crate can decode into a concrete variant.
///
/// Must list the serde name of every variant except `Unrecognized`.
const KNOWN_TYPES: [&str; 6] = [
    "ON_TOTAL_PRICE_OPT_IN",
    "ON_BTC_PRICE_OPT_IN",
    "SET_TICKER_PRICES",
    "SET_LOSERS_GAINERS",
    "SET_ASSET_CHARTS",
    "SET_DEPOSIT_QR_CODE_SRC",
];

impl Action {
    /// The wire `type` string of this action.
    pub fn action_type(&self) -> &str {
        match self {
            Action::OnTotalPriceOptIn => "ON_TOTAL_PRICE_OPT_IN",
            Action::OnBtcPriceOptIn => "ON_BTC_PRICE_OPT_IN",
            Action::SetTickerPrices(_) => "SET_TICKER_PRICES",
            Action::SetLosersGainers(_) => "SET_LOSERS_GAINERS",
            Action::SetAssetCharts(_) => "SET_ASSET_CHARTS",
            Action::SetDepositQrCodeSrc { .. } => "SET_DEPOSIT_QR_CODE_SRC",
            Action::Unrecognized(action_type) => action_type.as_str(),
        }
    }

    /// Decodes an action from a JSON value.
    ///
    /// Actions whose `type` is not one of ours become `Action::Unrecognized`
    /// instead of an error; a missing `type` or a malformed payload is an error.
    pub fn from_value(value: Value) -> Result<Self, EventsError> {
        if let Some(action_type) = value.get("type").and_then(Value::as_str) {
            if !KNOWN_TYPES.contains(&action_type) {
                return Ok(Action::Unrecognized(action_type.to_string()));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(text: &str) -> Result<Self, EventsError> {
        Self::from_value(serde_json::from_str(text)?)
    }
}

/// Parses a recorded action log.
///
/// Accepts either a single JSON array of actions or JSON lines (one action per
/// line, blank lines ignored).
pub fn parse_action_log(text: &str) -> Result<Vec<Action>, EventsError> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(text)?;
        return values.into_iter().map(Action::from_value).collect();
    }

    let mut actions = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| EventsError::InvalidLine {
            line: index + 1,
            source,
        })?;
        let action = Action::from_value(value).map_err(|e| match e {
            EventsError::Deserialization(source) => EventsError::InvalidLine {
                line: index + 1,
                source,
            },
            other => other,
        })?;
        actions.push(action);
    }

    tracing::debug!(count = actions.len(), "parsed action log");
    Ok(actions)
}

use crate::error::UtilsError;
use crate::price::parse_decimal;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// One asset's row of the account balance payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetBalance {
    pub balance: Decimal,
    pub btc_value: Decimal,
    pub usd_value: Decimal,
}

/// Account balances with BTC and USD totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub assets: BTreeMap<String, AssetBalance>,
    pub total_btc: Decimal,
    pub total_usd: Decimal,
}

impl AccountBalance {
    /// Parses `{ "<ASSET>": [balance, btcValue, usdValue], ... }`.
    ///
    /// Each element may be a JSON number or a decimal string.
    pub fn from_json(json: &str) -> Result<Self, UtilsError> {
        let raw: HashMap<String, Vec<Value>> = serde_json::from_str(json)?;

        let mut account = AccountBalance::default();
        for (asset, row) in raw {
            let field = |index: usize, name: &str| -> Result<Decimal, UtilsError> {
                row.get(index)
                    .and_then(value_to_decimal)
                    .ok_or_else(|| UtilsError::InvalidBalance {
                        asset: asset.clone(),
                        reason: format!("missing or non-numeric {}", name),
                    })
            };
            let entry = AssetBalance {
                balance: field(0, "balance")?,
                btc_value: field(1, "BTC value")?,
                usd_value: field(2, "USD value")?,
            };

            account.total_btc += entry.btc_value;
            account.total_usd += entry.usd_value;
            account.assets.insert(asset, entry);
        }

        tracing::debug!(
            assets = account.assets.len(),
            total_btc = %account.total_btc,
            total_usd = %account.total_usd,
            "account balance parsed"
        );
        Ok(account)
    }
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    }
}

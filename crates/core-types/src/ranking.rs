use crate::structs::{AssetRanking, LosersGainers, MergedRanking};

/// Returns the base asset of a compound pair: everything before the first `_`.
/// A pair without `_` is its own base symbol.
pub fn base_symbol(pair: &str) -> &str {
    pair.split('_').next().unwrap_or(pair)
}

/// Merges the losers and gainers lists into one table keyed by base asset.
///
/// Losers are processed first, so when an asset shows up in both lists the
/// gainers entry is the one that survives.
pub fn transform_losers_gainers(payload: &LosersGainers) -> MergedRanking {
    let mut merged = MergedRanking::with_capacity(payload.losers.len() + payload.gainers.len());

    for entry in payload.losers.iter().chain(payload.gainers.iter()) {
        let symbol = base_symbol(&entry.pair);
        if merged.insert(symbol.to_string(), AssetRanking::from(entry)).is_some() {
            tracing::trace!(symbol, pair = %entry.pair, "ranking entry overwritten");
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::RankingEntry;

    fn entry(pair: &str, last_price: f64, percent_change: f64) -> RankingEntry {
        RankingEntry {
            pair: pair.to_string(),
            last_price,
            percent_change,
        }
    }

    #[test]
    fn base_symbol_strips_quote_currency() {
        assert_eq!(base_symbol("BTC_USDT"), "BTC");
        assert_eq!(base_symbol("CRO_BTC_X"), "CRO");
        assert_eq!(base_symbol("ETH"), "ETH");
        assert_eq!(base_symbol(""), "");
    }

    #[test]
    fn merges_losers_and_gainers() {
        let payload = LosersGainers {
            losers: vec![entry("BTC_USDT", 1.0, -2.0)],
            gainers: vec![entry("ETH_USDT", 2.0, 5.0)],
        };

        let merged = transform_losers_gainers(&payload);

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged["BTC"],
            AssetRanking {
                last_price: 1.0,
                percent_change: -2.0
            }
        );
        assert_eq!(
            merged["ETH"],
            AssetRanking {
                last_price: 2.0,
                percent_change: 5.0
            }
        );
    }

    #[test]
    fn gainers_win_on_collision() {
        let payload = LosersGainers {
            losers: vec![entry("CRO_USDT", 0.1, -3.0)],
            gainers: vec![entry("CRO_BTC", 0.2, 4.0)],
        };

        let merged = transform_losers_gainers(&payload);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged["CRO"].percent_change, 4.0);
        assert_eq!(merged["CRO"].last_price, 0.2);
    }

    #[test]
    fn empty_payload_gives_empty_table() {
        assert!(transform_losers_gainers(&LosersGainers::default()).is_empty());
    }

    #[test]
    fn inputs_are_left_untouched() {
        let payload = LosersGainers {
            losers: vec![entry("BTC_USDT", 1.0, -2.0)],
            gainers: vec![],
        };
        let before = payload.clone();
        let _ = transform_losers_gainers(&payload);
        assert_eq!(payload, before);
    }
}

use crate::state::{BinanceState, CryptoDotComState, NewTabState};
use events::Action;
use std::sync::Arc;

/// Computes the next page state for `action`.
///
/// Only the path an action touches is rebuilt: the top-level struct, the branch it
/// changes and the one collection inside that branch. Every other `Arc` is shared
/// with `state`. Actions meant for other reducers return `state` itself.
pub fn reduce(state: &Arc<NewTabState>, action: &Action) -> Arc<NewTabState> {
    match action {
        Action::OnTotalPriceOptIn => update_crypto_dot_com(state, |branch| {
            branch.opt_in_total = true;
        }),

        Action::OnBtcPriceOptIn => update_crypto_dot_com(state, |branch| {
            branch.opt_in_btc_price = true;
        }),

        Action::SetTickerPrices(prices) => update_crypto_dot_com(state, |branch| {
            let mut merged = (*branch.ticker_prices).clone();
            merged.extend(prices.iter().map(|(asset, price)| (asset.clone(), *price)));
            branch.ticker_prices = Arc::new(merged);
        }),

        Action::SetLosersGainers(payload) => update_crypto_dot_com(state, |branch| {
            branch.losers_gainers = Arc::new(payload.clone());
        }),

        Action::SetAssetCharts(charts) => update_crypto_dot_com(state, |branch| {
            let mut merged = (*branch.charts).clone();
            merged.extend(charts.iter().map(|(asset, points)| (asset.clone(), points.clone())));
            branch.charts = Arc::new(merged);
        }),

        Action::SetDepositQrCodeSrc { asset, src } => update_binance(state, |branch| {
            let mut codes = (*branch.deposit_qr_codes).clone();
            codes.insert(asset.clone(), src.clone());
            branch.deposit_qr_codes = Arc::new(codes);
        }),

        Action::Unrecognized(_) => Arc::clone(state),
    }
}

fn update_crypto_dot_com(
    state: &Arc<NewTabState>,
    update: impl FnOnce(&mut CryptoDotComState),
) -> Arc<NewTabState> {
    let mut branch = (*state.crypto_dot_com_state).clone();
    update(&mut branch);
    Arc::new(NewTabState {
        crypto_dot_com_state: Arc::new(branch),
        ..(**state).clone()
    })
}

fn update_binance(
    state: &Arc<NewTabState>,
    update: impl FnOnce(&mut BinanceState),
) -> Arc<NewTabState> {
    let mut branch = (*state.binance_state).clone();
    update(&mut branch);
    Arc::new(NewTabState {
        binance_state: Arc::new(branch),
        ..(**state).clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{LosersGainers, RankingEntry, TickerPrice};
    use std::collections::HashMap;

    fn prices(entries: &[(&str, f64)]) -> HashMap<String, TickerPrice> {
        entries
            .iter()
            .map(|&(asset, price)| {
                (
                    asset.to_string(),
                    TickerPrice {
                        price,
                        volume: 10.0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn unrecognized_action_returns_the_same_state() {
        let state = Arc::new(NewTabState::default());
        let next = reduce(&state, &Action::Unrecognized("SET_THEME".to_string()));
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn opt_in_sets_one_flag_and_shares_the_rest() {
        let state = Arc::new(NewTabState::default());
        let next = reduce(&state, &Action::OnBtcPriceOptIn);

        assert!(next.crypto_dot_com_state.opt_in_btc_price);
        assert!(!next.crypto_dot_com_state.opt_in_total);
        // Previous snapshot is untouched.
        assert!(!state.crypto_dot_com_state.opt_in_btc_price);
        assert!(Arc::ptr_eq(&state.binance_state, &next.binance_state));
        assert!(Arc::ptr_eq(
            &state.crypto_dot_com_state.ticker_prices,
            &next.crypto_dot_com_state.ticker_prices
        ));

        let next = reduce(&next, &Action::OnTotalPriceOptIn);
        assert!(next.crypto_dot_com_state.opt_in_total);
        assert!(next.crypto_dot_com_state.opt_in_btc_price);
    }

    #[test]
    fn ticker_prices_merge_across_dispatches() {
        let state = Arc::new(NewTabState::default());
        let first = reduce(
            &state,
            &Action::SetTickerPrices(prices(&[("BTC", 30000.0), ("ETH", 2000.0)])),
        );
        let second = reduce(&first, &Action::SetTickerPrices(prices(&[("CRO", 0.1)])));

        let table = &second.crypto_dot_com_state.ticker_prices;
        assert_eq!(table.len(), 3);
        assert!(table.contains_key("BTC"));
        assert!(table.contains_key("ETH"));
        assert!(table.contains_key("CRO"));
        // The first snapshot still only has its own keys.
        assert_eq!(first.crypto_dot_com_state.ticker_prices.len(), 2);
    }

    #[test]
    fn newer_ticker_price_overwrites_same_asset() {
        let state = Arc::new(NewTabState::default());
        let state = reduce(&state, &Action::SetTickerPrices(prices(&[("BTC", 1.0)])));
        let state = reduce(&state, &Action::SetTickerPrices(prices(&[("BTC", 2.0)])));
        assert_eq!(state.crypto_dot_com_state.ticker_prices["BTC"].price, 2.0);
    }

    #[test]
    fn losers_gainers_are_replaced_wholesale() {
        let entry = |pair: &str| RankingEntry {
            pair: pair.to_string(),
            last_price: 1.0,
            percent_change: 1.0,
        };
        let state = Arc::new(NewTabState::default());
        let state = reduce(
            &state,
            &Action::SetLosersGainers(LosersGainers {
                losers: vec![entry("BTC_USDT")],
                gainers: vec![entry("ETH_USDT")],
            }),
        );
        let state = reduce(
            &state,
            &Action::SetLosersGainers(LosersGainers {
                losers: vec![],
                gainers: vec![entry("CRO_USDT")],
            }),
        );

        let stored = &state.crypto_dot_com_state.losers_gainers;
        assert!(stored.losers.is_empty());
        assert_eq!(stored.gainers, vec![entry("CRO_USDT")]);
    }

    #[test]
    fn deposit_qr_code_lands_in_binance_branch() {
        let state = Arc::new(NewTabState::default());
        let next = reduce(
            &state,
            &Action::SetDepositQrCodeSrc {
                asset: "BTC".to_string(),
                src: "data:image/png;base64,AA==".to_string(),
            },
        );

        assert_eq!(
            next.binance_state.deposit_qr_codes.get("BTC").map(String::as_str),
            Some("data:image/png;base64,AA==")
        );
        assert!(Arc::ptr_eq(
            &state.crypto_dot_com_state,
            &next.crypto_dot_com_state
        ));
    }
}

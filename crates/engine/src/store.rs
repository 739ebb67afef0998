use crate::error::EngineError;
use crate::reducer::reduce;
use crate::state::NewTabState;
use events::{Action, parse_action_log};
use std::path::Path;
use std::sync::Arc;

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&Arc<NewTabState>)>;

/// Single owner of the page state.
///
/// All writes go through `dispatch`; readers get cheap `Arc` snapshots via `state`
/// or register a listener with `subscribe`.
pub struct Store {
    state: Arc<NewTabState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl Store {
    pub fn new(initial: NewTabState) -> Self {
        Self {
            state: Arc::new(initial),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<NewTabState> {
        Arc::clone(&self.state)
    }

    /// Runs `action` through the reducer and returns the resulting snapshot.
    ///
    /// Listeners are only notified when the state actually changed.
    pub fn dispatch(&mut self, action: &Action) -> Arc<NewTabState> {
        let next = reduce(&self.state, action);

        if Arc::ptr_eq(&next, &self.state) {
            tracing::trace!(action = action.action_type(), "action ignored by this store");
            return next;
        }

        tracing::debug!(action = action.action_type(), "state updated");
        self.state = Arc::clone(&next);
        for (_, listener) in &self.listeners {
            listener(&next);
        }
        next
    }

    /// Dispatches every action in order and returns how many changed the state.
    pub fn replay<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = Action>,
    {
        let mut applied = 0;
        for action in actions {
            let before = self.state();
            if !Arc::ptr_eq(&before, &self.dispatch(&action)) {
                applied += 1;
            }
        }
        applied
    }

    /// Replays a recorded action log (JSON array or JSON lines) from disk.
    pub fn replay_file(&mut self, path: &Path) -> Result<usize, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ActionLog {
            path: path.display().to_string(),
            source,
        })?;
        let actions = parse_action_log(&text)?;
        let total = actions.len();
        let applied = self.replay(actions);

        tracing::info!(path = %path.display(), total, applied, "action log replayed");
        Ok(applied)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Arc<NewTabState>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(NewTabState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TickerPrice;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn ticker(asset: &str, price: f64) -> Action {
        let mut prices = HashMap::new();
        prices.insert(asset.to_string(), TickerPrice { price, volume: 1.0 });
        Action::SetTickerPrices(prices)
    }

    #[test]
    fn dispatch_replaces_the_snapshot() {
        let mut store = Store::default();
        let before = store.state();

        store.dispatch(&Action::OnTotalPriceOptIn);

        assert!(!before.crypto_dot_com_state.opt_in_total);
        assert!(store.state().crypto_dot_com_state.opt_in_total);
    }

    #[test]
    fn unrecognized_actions_keep_the_same_snapshot() {
        let mut store = Store::default();
        let before = store.state();
        let after = store.dispatch(&Action::Unrecognized("SHOW_WIDGET".to_string()));
        assert!(Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn listeners_see_changes_only() {
        let mut store = Store::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            sink.borrow_mut()
                .push(state.crypto_dot_com_state.ticker_prices.len());
        });

        store.dispatch(&ticker("BTC", 1.0));
        store.dispatch(&Action::Unrecognized("NOOP".to_string()));
        store.dispatch(&ticker("ETH", 2.0));

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn unsubscribed_listeners_are_not_called() {
        let mut store = Store::default();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.dispatch(&Action::OnBtcPriceOptIn);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(&Action::OnTotalPriceOptIn);

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn replay_counts_applied_actions() {
        let mut store = Store::default();
        let applied = store.replay(vec![
            ticker("BTC", 1.0),
            Action::Unrecognized("NOOP".to_string()),
            ticker("CRO", 0.1),
        ]);
        assert_eq!(applied, 2);
        assert_eq!(store.state().crypto_dot_com_state.ticker_prices.len(), 2);
    }

    #[test]
    fn replay_file_reports_missing_log() {
        let mut store = Store::default();
        let err = store
            .replay_file(Path::new("no/such/actions.jsonl"))
            .unwrap_err();
        assert!(matches!(err, EngineError::ActionLog { .. }));
    }

    #[test]
    fn replay_file_reports_malformed_actions() {
        let path = std::env::temp_dir().join(format!(
            "newtab-widgets-bad-actions-{}.jsonl",
            std::process::id()
        ));
        std::fs::write(&path, "{\"type\":\"SET_TICKER_PRICES\",\"payload\":[1]}\n").unwrap();

        let mut store = Store::default();
        let result = store.replay_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(EngineError::Events(_))));
        assert!(store.state().crypto_dot_com_state.ticker_prices.is_empty());
    }

    #[test]
    fn replay_file_reads_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "newtab-widgets-actions-{}.jsonl",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "{\"type\":\"ON_BTC_PRICE_OPT_IN\"}\n{\"type\":\"SET_TICKER_PRICES\",\"payload\":{\"BTC\":{\"price\":1.0,\"volume\":2.0}}}\n",
        )
        .unwrap();

        let mut store = Store::default();
        let applied = store.replay_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(applied, 2);
        let state = store.state();
        assert!(state.crypto_dot_com_state.opt_in_btc_price);
        assert_eq!(state.crypto_dot_com_state.ticker_prices["BTC"].price, 1.0);
    }
}

//! # New-Tab Engine
//!
//! Owns the new-tab page state. `reduce` is the pure transition function,
//! `Store` is the single writer wrapped around it, and `selectors` derive the
//! per-asset views the widgets render.

pub mod error;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;

pub use error::EngineError;
pub use reducer::reduce;
pub use selectors::{AssetQuote, asset_quote, merged_rankings, top_movers};
pub use state::{BinanceState, CryptoDotComState, NewTabState};
pub use store::{Store, SubscriptionId};

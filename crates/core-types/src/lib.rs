pub mod error;
pub mod ranking;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use ranking::{base_symbol, transform_losers_gainers};
pub use structs::{
    AssetRanking, AssetSymbol, ChartDataPoint, LosersGainers, MergedRanking, RankingEntry,
    TickerPrice, parse_asset_symbol,
};

//! # Market Utils
//!
//! Stateless helpers behind the new-tab crypto widgets: USD price formatting,
//! OAuth client URL validation, deposit QR data URIs and chart plotting.
//!
//! Apart from the typed-error variants (`encode_qr_data_uri`, `AccountBalance::from_json`),
//! nothing here returns an error to the caller: malformed input degrades to a safe
//! default and QR failures are logged.

pub mod balance;
pub mod chart;
pub mod client_url;
pub mod error;
pub mod price;
pub mod qr;

pub use balance::{AccountBalance, AssetBalance};
pub use chart::plot_chart_points;
pub use client_url::is_valid_client_url;
pub use error::UtilsError;
pub use price::{format_usd_currency, get_usd_price, parse_decimal};
pub use qr::{DATA_URI_PREFIX, encode_qr_data_uri, generate_qr_data};

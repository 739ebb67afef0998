use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the widgets binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What the crypto widget shows and how big its chart is.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// Assets listed on the "top movers" view, in display order.
    #[serde(default = "default_top_movers")]
    pub top_movers: Vec<String>,
    /// Height of the asset detail chart in pixels. Must leave room for the 2px stroke.
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            top_movers: default_top_movers(),
            chart_height: default_chart_height(),
            chart_width: default_chart_width(),
        }
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_top_movers() -> Vec<String> {
    vec!["BTC".to_string(), "ETH".to_string(), "CRO".to_string()]
}

fn default_chart_height() -> u32 {
    100
}

fn default_chart_width() -> u32 {
    309
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "newtab-widgets".to_string()
}

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, LoggingConfig, WidgetConfig};

/// File consulted when no explicit path is given. It is optional.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `NEWTAB_WIDGET__CHART_WIDTH=400`.
pub const ENV_PREFIX: &str = "NEWTAB";

/// Command-line flags shared by every binary that loads this configuration.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file (defaults to `config.toml` if present).
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file (required only when
/// `path` is given explicitly), then `NEWTAB_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

/// Loads configuration from an in-memory TOML document. No environment overrides apply.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.widget.chart_height <= 2 {
        return Err(ConfigError::ValidationError(format!(
            "widget.chart_height must be greater than 2, got {}",
            config.widget.chart_height
        )));
    }
    if config.widget.chart_width == 0 {
        return Err(ConfigError::ValidationError(
            "widget.chart_width must be non-zero".to_string(),
        ));
    }
    if config.widget.top_movers.is_empty() {
        return Err(ConfigError::ValidationError(
            "widget.top_movers must list at least one asset".to_string(),
        ));
    }
    Ok(())
}

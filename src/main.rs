use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use configuration::{Config, ConfigArgs, LoggingConfig};
use core_types::parse_asset_symbol;
use engine::{Store, top_movers};
use events::Action;
use market_utils::{
    AccountBalance, format_usd_currency, generate_qr_data, get_usd_price, is_valid_client_url,
    plot_chart_points,
};
use std::path::PathBuf;
use tokio::sync::oneshot;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The main entry point for the new-tab widgets tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load NEWTAB_* overrides from a .env file if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.config.as_deref())
        .context("Failed to load configuration")?;

    // Held until main returns so buffered file logs are flushed
    let _log_guard = init_logging(&config.logging);
    // The subscriber depends on the loaded config, so this is logged here.
    tracing::debug!(path = ?cli.config.config, ?config, "configuration loaded");

    // Execute the appropriate command
    match cli.command {
        Commands::UsdPrice { balance, unit_price } => {
            println!("{}", get_usd_price(&balance, &unit_price));
        }
        Commands::ValidateUrl { url } => {
            if !is_valid_client_url(&url) {
                println!("invalid");
                bail!("{} is not an OAuth authorize URL", url);
            }
            println!("valid");
        }
        Commands::Qr(args) => handle_qr(args).await?,
        Commands::Replay(args) => handle_replay(args, &config)?,
        Commands::Balance(args) => handle_balance(args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Market-data helpers and state replay for the new-tab crypto widgets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Multiply a balance by a unit price and print it with two decimals.
    UsdPrice {
        balance: String,
        unit_price: String,
    },
    /// Check whether a URL is the exchange's OAuth authorize page.
    ValidateUrl { url: String },
    /// Render a deposit QR code as a PNG data URI.
    Qr(QrArgs),
    /// Replay a recorded action log and show the resulting widget state.
    Replay(ReplayArgs),
    /// Sum an account balance payload.
    Balance(BalanceArgs),
}

#[derive(Parser)]
struct QrArgs {
    /// The deposit address or URL to encode.
    url: String,

    /// The asset the deposit address belongs to (e.g., "BTC").
    #[arg(long)]
    asset: String,
}

#[derive(Parser)]
struct ReplayArgs {
    /// Action log: a JSON array or one JSON action per line.
    file: PathBuf,

    /// Print the final state as JSON instead of the top movers table.
    #[arg(long)]
    json: bool,

    /// Also print chart polyline points for this asset.
    #[arg(long)]
    chart: Option<String>,
}

#[derive(Parser)]
struct BalanceArgs {
    /// JSON file of the form `{ "BTC": [balance, btcValue, usdValue], ... }`.
    file: PathBuf,

    /// Current BTC price in USD; prints the BTC total converted with it.
    #[arg(long)]
    btc_price: Option<String>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. Console output goes to stderr; when a log
/// directory is configured a daily rolling file is added.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .init();
            None
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_qr(args: QrArgs) -> anyhow::Result<()> {
    let asset = parse_asset_symbol(&args.asset)?;
    let (tx, rx) = oneshot::channel();

    let Some(task) = generate_qr_data(&args.url, &asset, move |asset, src| {
        let _ = tx.send(Action::SetDepositQrCodeSrc { asset, src });
    }) else {
        bail!("QR generation could not be started");
    };
    task.await.context("QR generation task panicked")?;

    // The callback is skipped on failure, which drops the sender.
    let action = rx
        .await
        .context("Could not create deposit QR (see log for details)")?;

    let mut store = Store::default();
    let state = store.dispatch(&action);
    if let Some(src) = state.binance_state.deposit_qr_codes.get(&asset) {
        println!("{}", src);
    }
    Ok(())
}

fn handle_replay(args: ReplayArgs, config: &Config) -> anyhow::Result<()> {
    let mut store = Store::default();
    let applied = store
        .replay_file(&args.file)
        .with_context(|| format!("Failed to replay {}", args.file.display()))?;
    let state = store.state();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*state)?);
    } else {
        println!("Applied {} actions", applied);
        let widget = &state.crypto_dot_com_state;
        for (symbol, quote) in top_movers(widget, config.widget.top_movers.as_slice()) {
            let price = quote
                .price
                .map(format_usd_currency)
                .unwrap_or_else(|| "-".to_string());
            let change = quote
                .percent_change
                .map(|pct| format!("{}%", pct))
                .unwrap_or_else(|| "-".to_string());
            println!("{:<6} {:>16} {:>10}", symbol, price, change);
        }
    }

    if let Some(asset) = args.chart {
        let asset = parse_asset_symbol(&asset)?;
        let points = state
            .crypto_dot_com_state
            .charts
            .get(&asset)
            .map(|data| plot_chart_points(data, config.widget.chart_height, config.widget.chart_width))
            .unwrap_or_default();
        if points.is_empty() {
            tracing::warn!(%asset, "no chart data for asset");
        } else {
            println!("{}", points);
        }
    }

    Ok(())
}

fn handle_balance(args: BalanceArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let account = AccountBalance::from_json(&text)?;

    for (asset, row) in &account.assets {
        println!(
            "{:<6} {:>20} {:>14} BTC {:>14} USD",
            asset, row.balance, row.btc_value, row.usd_value
        );
    }
    println!("Total: {} BTC / {} USD", account.total_btc, account.total_usd);

    if let Some(btc_price) = args.btc_price {
        println!(
            "BTC total at {}: {} USD",
            btc_price,
            get_usd_price(&account.total_btc.to_string(), &btc_price)
        );
    }

    Ok(())
}

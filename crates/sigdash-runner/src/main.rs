//! # sigdash-runner
//!
//! CLI front door for the sigdash client stack. Talks to the signals backend
//! through `sigdash-api` and keeps subscriber preferences in the local
//! preference store.
//!
//! # Usage
//!
//! ```bash
//! sigdash signals --limit 10 --signal-type BUY
//! sigdash signal BTC-USD
//! sigdash subscribe a@b.com
//! sigdash confirm <token>
//! ```
//!
//! The backend address comes from `SIGDASH_API_URL`, falling back to the
//! build-mode default.

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use sigdash_api::ApiClient;
use sigdash_api::confirm::{ConfirmState, ConfirmationFlow, Navigator};
use sigdash_api::endpoints::SignalQuery;
use sigdash_api::endpoints::backtests::BACKTEST_RANGES;
use sigdash_api::endpoints::market::VALID_RANGES;
use sigdash_core::config::ApiConfig;
use sigdash_core::store::{FileStorage, SubscriptionStore};
use sigdash_core::types::SignalType;

/// Market-signal dashboard client.
#[derive(Parser)]
#[command(name = "sigdash", about = "Market-signal dashboard client")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Preference-store directory (default: the platform data dir).
    #[arg(long)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List signals, newest first.
    Signals {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// BUY, SELL, or HOLD.
        #[arg(long)]
        signal_type: Option<String>,
        /// Minimum confidence score (0-100).
        #[arg(long)]
        min_strength: Option<f64>,
    },
    /// Latest signal for one symbol.
    Signal { symbol: String },
    /// Signal history for one symbol.
    History {
        symbol: String,
        /// Days of history (backend default 30, cap 90).
        #[arg(long)]
        days: Option<u32>,
    },
    /// OHLCV candles for one symbol.
    Ohlcv {
        symbol: String,
        #[arg(long)]
        limit: Option<u32>,
        /// Named window: 1d, 1w, 1m, 3m, 6m, 1y, 2y.
        #[arg(long)]
        range: Option<String>,
    },
    /// Indicator rows (RSI, EMA, MACD) for one symbol.
    Indicators {
        symbol: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Backtest summary for one symbol.
    Backtest {
        symbol: String,
        /// Named window: 1m, 3m, 6m, 1y, 3y, 5y (backend default 1y).
        #[arg(long)]
        range: Option<String>,
    },
    /// Subscribe an email address to signal notifications.
    Subscribe { email: String },
    /// Unsubscribe using the token from a notification email.
    Unsubscribe { token: String },
    /// Confirm a pending subscription using the emailed token.
    Confirm { token: String },
    /// Show or update locally stored preferences.
    Prefs {
        /// Set the card-collapsed flag.
        #[arg(long)]
        minimized: Option<bool>,
    },
    /// Backend health check.
    Health,
}

/// Redirect sink for the confirmation flow: the CLI has no router, so a
/// navigation is just logged.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!("redirecting to {path}");
    }
}

fn parse_signal_type(raw: &str) -> Result<SignalType> {
    match raw.to_ascii_uppercase().as_str() {
        "BUY" => Ok(SignalType::Buy),
        "SELL" => Ok(SignalType::Sell),
        "HOLD" => Ok(SignalType::Hold),
        other => bail!("invalid signal type '{other}' (expected BUY, SELL, or HOLD)"),
    }
}

/// Reject a bad `--range` locally instead of burning a round trip on a
/// guaranteed 400.
fn check_range(raw: Option<&str>, valid: &[&str]) -> Result<()> {
    if let Some(range) = raw {
        if !valid.contains(&range) {
            bail!("invalid range '{range}' (expected one of: {})", valid.join(", "));
        }
    }
    Ok(())
}

fn open_store(data_dir: Option<&str>) -> Result<SubscriptionStore> {
    let storage = match data_dir {
        Some(dir) => FileStorage::with_dir(dir),
        None => FileStorage::new()?,
    };
    Ok(SubscriptionStore::new(Box::new(storage)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    sigdash_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref());

    let config = ApiConfig::from_env();
    info!("sigdash starting — base_url={}", config.base_url);
    let client = ApiClient::new(&config);

    match cli.command {
        Command::Signals { limit, offset, signal_type, min_strength } => {
            let query = SignalQuery {
                limit,
                offset,
                signal_type: signal_type.as_deref().map(parse_signal_type).transpose()?,
                min_strength,
            };
            let list = client.list_signals(&query).await?;
            info!("{} of {} signal(s)", list.signals.len(), list.total);
            print_json(&list)?;
        }
        Command::Signal { symbol } => {
            let signal = client.latest_signal(&symbol).await?;
            print_json(&signal)?;
        }
        Command::History { symbol, days } => {
            let list = client.signal_history(&symbol, days).await?;
            info!("{} historical signal(s) for {symbol}", list.signals.len());
            print_json(&list)?;
        }
        Command::Ohlcv { symbol, limit, range } => {
            check_range(range.as_deref(), VALID_RANGES)?;
            let candles = client.ohlcv(&symbol, limit, range.as_deref()).await?;
            info!("{} candle(s) for {symbol}", candles.len());
            print_json(&candles)?;
        }
        Command::Indicators { symbol, limit } => {
            let rows = client.indicators(&symbol, limit).await?;
            info!("{} indicator row(s) for {symbol}", rows.len());
            print_json(&rows)?;
        }
        Command::Backtest { symbol, range } => {
            check_range(range.as_deref(), BACKTEST_RANGES)?;
            let summary = client.backtest_summary(&symbol, range.as_deref()).await?;
            print_json(&summary)?;
        }
        Command::Subscribe { email } => {
            let response = client.subscribe(&email).await?;
            let mut store = open_store(cli.data_dir.as_deref())?;
            store.set_email(Some(response.email.clone()))?;
            info!("{}", response.message);
            print_json(&response)?;
        }
        Command::Unsubscribe { token } => {
            let response = client.unsubscribe(&token).await?;
            let mut store = open_store(cli.data_dir.as_deref())?;
            store.set_email(None)?;
            info!("{}", response.message);
            print_json(&response)?;
        }
        Command::Confirm { token } => {
            let mut flow = ConfirmationFlow::new(client, Arc::new(LogNavigator));
            flow.run(&token).await;
            match flow.state().clone() {
                ConfirmState::Success { message, email } => {
                    info!("{message} ({email})");
                    let mut store = open_store(cli.data_dir.as_deref())?;
                    store.set_email(Some(email))?;
                    // Let the delayed redirect fire before exiting.
                    flow.finish_redirect().await;
                }
                ConfirmState::Error { message } => {
                    error!("confirmation failed: {message}");
                }
                ConfirmState::Loading => {}
            }
        }
        Command::Prefs { minimized } => {
            let mut store = open_store(cli.data_dir.as_deref())?;
            if let Some(value) = minimized {
                store.set_is_minimized(value)?;
            }
            println!(
                "email: {}\nminimized: {}",
                store.email().unwrap_or("(none)"),
                store.is_minimized()
            );
        }
        Command::Health => {
            let health = client.health().await?;
            print_json(&health)?;
        }
    }

    Ok(())
}

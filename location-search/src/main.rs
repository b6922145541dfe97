//! location-search - line-oriented driver for the search controller
//!
//! Every input line replaces the query; results are searched after the
//! debounce interval. `:select N` fetches the forecast for result N.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p location-search
//! RUST_LOG=debug cargo run -p location-search -- --debounce-ms 500
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use location_search::api::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL};
use location_search::cli::{render_snapshot, Command, HELP};
use location_search::{
    Action, ClientConfig, ControllerConfig, OpenMeteoClient, SearchController, SearchState,
};

/// Debounced location search with multi-day forecasts (Open-Meteo)
#[derive(Parser, Debug)]
#[command(name = "location-search")]
#[command(about = "Search locations as you type and show their forecast")]
struct Args {
    /// Quiet period after the last input before searching, in milliseconds
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    /// Maximum number of search results
    #[arg(long, default_value_t = 10)]
    result_count: u8,

    /// Geocoding search endpoint
    #[arg(long, default_value = DEFAULT_GEOCODING_URL)]
    geocoding_url: String,

    /// Forecast endpoint
    #[arg(long, default_value = DEFAULT_FORECAST_URL)]
    forecast_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            geocoding_url: self.geocoding_url.clone(),
            forecast_url: self.forecast_url.clone(),
            result_count: self.result_count,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let client =
        OpenMeteoClient::new(args.client_config()).context("failed to build HTTP client")?;
    let mut controller = SearchController::new(Arc::new(client), args.controller_config());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();

    let printer = tokio::spawn(print_snapshots(controller.subscribe(), shutdown.clone()));
    let reader = tokio::spawn(read_commands(event_tx, controller.subscribe()));

    println!("{HELP}");
    controller.run(event_rx).await;

    shutdown.cancel();
    printer.await.context("snapshot printer panicked")?;
    reader.await.context("input reader panicked")??;
    Ok(())
}

/// Forward stdin lines to the controller until `:quit` or EOF.
async fn read_commands(
    events: mpsc::UnboundedSender<Action>,
    state: watch::Receiver<SearchState>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = Command::parse(&line);
        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            _ => {}
        }

        let resolved = command.to_action(&state.borrow());
        match resolved {
            Ok(Some(action)) => {
                if events.send(action).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => println!("! {message}"),
        }
    }

    tracing::debug!("Input closed");
    Ok(())
}

/// Print a snapshot whenever the state changes.
async fn print_snapshots(mut state: watch::Receiver<SearchState>, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = render_snapshot(&state.borrow_and_update());
                println!("{snapshot}");
            }
        }
    }
}

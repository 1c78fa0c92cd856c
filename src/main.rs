mod cli_messages;
mod config;
mod consts;
mod error_classifier;
mod events;
mod logging;
mod metrics;
mod quotes;
mod refresh;
mod renderer;
mod session;
mod store;
mod ui;

use crate::config::{Config, get_config_path};
use crate::cli_messages::print_fetch_error;
use crate::logging::init_logger;
use crate::metrics::MarketSummary;
use crate::quotes::{HttpQuoteSource, QuoteSource};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::ui::dashboard::utils::{format_change, format_price, format_rsi};
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        /// Run without the terminal UI, logging updates to stderr
        #[arg(long, action = ArgAction::SetTrue)]
        headless: bool,

        /// Seconds between automatic refreshes
        #[arg(long, value_name = "SECONDS")]
        interval_secs: Option<u64>,

        /// Start with auto-refresh paused
        #[arg(long, action = ArgAction::SetTrue)]
        no_auto_refresh: bool,

        /// Quote endpoint URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Disable background colors
        #[arg(long = "no-background", action = ArgAction::SetFalse, default_value_t = true)]
        with_background: bool,
    },
    /// Fetch quotes once and print them
    Fetch {
        /// Quote endpoint URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
    /// Save dashboard settings
    Configure {
        /// Seconds between automatic refreshes
        #[arg(long, value_name = "SECONDS")]
        interval_secs: Option<u64>,

        /// Whether auto-refresh starts enabled
        #[arg(long, value_name = "BOOL")]
        auto_refresh: Option<bool>,

        /// Quote endpoint URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
    /// Delete the saved settings
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            headless,
            interval_secs,
            no_auto_refresh,
            url,
            with_background,
        } => {
            let mut config = Config::load_or_default(&config_path)?.with_env_overrides();
            config.override_endpoint(url);
            if let Some(secs) = interval_secs {
                config.interval_secs = secs;
            }
            if no_auto_refresh {
                config.auto_refresh = false;
            }

            // Before setup, which already spawns the first fetch
            if headless {
                init_logger();
            }
            let session = setup_session(config).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Fetch { url } => {
            let mut config = Config::load_or_default(&config_path)?.with_env_overrides();
            config.override_endpoint(url);
            fetch_once(&config.endpoint).await
        }
        Command::Configure {
            interval_secs,
            auto_refresh,
            url,
        } => {
            let mut config = Config::load_or_default(&config_path)?;
            config.override_endpoint(url);
            if let Some(secs) = interval_secs {
                config.interval_secs = secs;
            }
            if let Some(enabled) = auto_refresh {
                config.auto_refresh = enabled;
            }
            // Reject settings the dashboard could not start with
            config.refresh_config()?;

            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Configuration saved",
                "{} every {}s, auto-refresh {}",
                config.endpoint,
                config.interval_secs,
                if config.auto_refresh { "on" } else { "off" }
            );
            Ok(())
        }
        Command::Reset => {
            print_cmd_info!("Resetting", "clearing {}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Performs a single refresh and prints the result.
async fn fetch_once(endpoint: &str) -> Result<(), Box<dyn Error>> {
    let source = HttpQuoteSource::new(endpoint);
    print_cmd_info!("Fetching quotes", "{}", source.endpoint());
    let snapshot = match source
        .fetch_quotes()
        .await
        .and_then(|response| response.into_snapshot())
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            print_fetch_error(&e);
            return Err(e.into());
        }
    };

    print_cmd_info!("Last update", "{}", snapshot.local_time_label());
    for quote in &snapshot.quotes {
        println!(
            "{:<8}{:>12}  {:<20}RSI {}",
            quote.symbol,
            format_price(quote.price),
            format_change(quote),
            format_rsi(quote.rsi)
        );
    }

    match MarketSummary::from_quotes(&snapshot.quotes) {
        Ok(summary) => print_cmd_info!(
            "Summary",
            "{} active | avg volume {} | top performer {}",
            summary.active_stocks,
            summary.formatted_average_volume(),
            summary.top_performer
        ),
        Err(e) => print_cmd_warn!("Summary", "{}", e),
    }
    Ok(())
}

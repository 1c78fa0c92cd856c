//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::Event;
use crate::metrics::MarketSummary;
use crate::quotes::Snapshot;
use crate::refresh::RefreshStatus;
use crate::renderer::{Renderer, dispatch};
use crate::ui::dashboard::utils::{format_change, format_price};
use log::{debug, info, warn};
use std::error::Error;

/// Writes dashboard updates to the log instead of a terminal UI.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    /// Number of fetches currently running
    loading: usize,
}

impl Renderer for HeadlessRenderer {
    fn loading_begin(&mut self) {
        self.loading += 1;
        debug!("Loading quotes ({} in flight)", self.loading);
    }

    fn loading_end(&mut self) {
        self.loading = self.loading.saturating_sub(1);
    }

    fn data_updated(&mut self, snapshot: &Snapshot, summary: Option<&MarketSummary>) {
        info!(
            "Last update {}: {} quotes",
            snapshot.local_time_label(),
            snapshot.quotes.len()
        );
        for quote in &snapshot.quotes {
            info!(
                "  {:<6} {:>10} {}",
                quote.symbol,
                format_price(quote.price),
                format_change(quote)
            );
        }
        if let Some(summary) = summary {
            info!(
                "Active stocks: {} | Avg volume: {} | Top performer: {}",
                summary.active_stocks,
                summary.formatted_average_volume(),
                summary.top_performer
            );
        }
    }

    fn status_changed(&mut self, status: RefreshStatus) {
        info!("Auto-refresh {}", status);
    }

    fn error_occurred(&mut self, message: &str) {
        warn!("{}", message);
    }

    fn record(&mut self, event: &Event) {
        if let crate::events::Signal::ErrorOccurred(_) = event.signal {
            debug!("{}", event.msg);
        }
    }
}

/// Runs the application in headless mode. The `log` backend must already be
/// installed, see [`crate::logging::init_logger`].
///
/// This function handles:
/// 1. Console logging of dashboard updates
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.endpoint, &session.refresh_config);

    let mut renderer = HeadlessRenderer::default();

    // Event loop: log events until Ctrl+C
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                dispatch(&mut renderer, &event);
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    print_session_shutdown();
    session.controller.shutdown().await;
    print_session_exit_success();

    Ok(())
}

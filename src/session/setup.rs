//! Session setup and initialization

use crate::config::{Config, RefreshConfig};
use crate::consts::EVENT_QUEUE_SIZE;
use crate::events::{Event, EventSender};
use crate::quotes::{HttpQuoteSource, QuoteSource};
use crate::refresh::RefreshController;
use crate::store::DashboardStore;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Signals from the refresh core
    pub event_receiver: mpsc::Receiver<Event>,
    /// Running refresh state machine
    pub controller: RefreshController,
    /// Endpoint being polled
    pub endpoint: String,
    /// Refresh settings the session started with
    pub refresh_config: RefreshConfig,
}

/// Sets up a polling session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Validates the refresh settings
/// 2. Creates the HTTP quote source and snapshot store
/// 3. Starts the refresh controller
/// 4. Kicks off the initial load
pub async fn setup_session(config: Config) -> Result<SessionData, Box<dyn Error>> {
    let refresh_config = config.refresh_config()?;
    let source: Arc<dyn QuoteSource> = Arc::new(HttpQuoteSource::new(config.endpoint.clone()));
    setup_session_with_source(config.endpoint, refresh_config, source).await
}

pub(crate) async fn setup_session_with_source(
    endpoint: String,
    refresh_config: RefreshConfig,
    source: Arc<dyn QuoteSource>,
) -> Result<SessionData, Box<dyn Error>> {
    let (event_sender, event_receiver) = EventSender::channel(EVENT_QUEUE_SIZE);

    let mut controller =
        RefreshController::new(refresh_config, source, DashboardStore::new(), event_sender);
    controller.start(refresh_config).await;

    // Initial load, independent of the timer
    drop(controller.trigger_manual());

    Ok(SessionData {
        event_receiver,
        controller,
        endpoint,
        refresh_config,
    })
}

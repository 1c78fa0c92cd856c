//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::config::interval_from_secs;
use crate::events::Event as DashboardEvent;
use crate::refresh::RefreshController;
use crate::renderer::dispatch;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crossterm::event::{self, Event, KeyCode};
use log::warn;
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tokio::sync::mpsc;

/// What the UI loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    /// Drives scheduled and manual refreshes.
    controller: RefreshController,

    /// Receives signals from the refresh core.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    /// Dashboard screen state.
    state: DashboardState,
}

impl App {
    pub fn new(
        controller: RefreshController,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        state: DashboardState,
    ) -> Self {
        Self {
            controller,
            event_receiver,
            state,
        }
    }

    /// Apply every queued signal to the dashboard.
    fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            dispatch(&mut self.state, &event);
        }
    }

    pub async fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        // Make room for the status events the controller is about to queue
        self.drain_events();
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('r') => {
                // Outcome arrives through the event channel
                drop(self.controller.trigger_manual());
            }
            KeyCode::Char('a') => {
                let enabled = !self.controller.config().auto_enabled;
                self.controller.set_auto_refresh(enabled).await;
            }
            KeyCode::Char('+') => self.change_interval(1).await,
            KeyCode::Char('-') => self.change_interval(-1).await,
            _ => {}
        }
        self.state.status = self.controller.status();
        KeyAction::Continue
    }

    async fn change_interval(&mut self, delta_secs: i64) {
        let current = self.state.interval_secs as i64;
        let secs = (current + delta_secs).max(1) as u64;
        if secs == self.state.interval_secs {
            return;
        }
        match interval_from_secs(secs) {
            Ok(interval_ms) => {
                self.controller.set_interval(interval_ms).await;
                self.state.set_interval_secs(secs);
            }
            Err(e) => warn!("Ignoring interval change: {}", e),
        }
    }

    /// Stop refreshing and wait for the timer task to exit.
    pub async fn shutdown(self) {
        self.controller.shutdown().await;
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        app.drain_events();
        app.state.update();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if app.handle_key(key.code).await == KeyAction::Quit {
                    app.shutdown().await;
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshConfig;
    use crate::events::EventSender;
    use crate::quotes::MockQuoteSource;
    use crate::refresh::RefreshStatus;
    use crate::store::DashboardStore;
    use std::num::NonZeroU64;
    use std::sync::Arc;

    fn app(config: RefreshConfig) -> App {
        app_with_queue(config, 16)
    }

    fn app_with_queue(config: RefreshConfig, capacity: usize) -> App {
        let (sender, receiver) = EventSender::channel(capacity);
        let controller = RefreshController::new(
            config,
            Arc::new(MockQuoteSource::new()),
            DashboardStore::new(),
            sender,
        );
        let state = DashboardState::new("http://test".to_string(), config, false);
        App::new(controller, receiver, state)
    }

    fn paused(interval_secs: u64) -> RefreshConfig {
        RefreshConfig::new(NonZeroU64::new(interval_secs * 1000).unwrap(), false)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app(paused(10));
        assert_eq!(app.handle_key(KeyCode::Char('q')).await, KeyAction::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc).await, KeyAction::Quit);
        assert_eq!(app.handle_key(KeyCode::Char('x')).await, KeyAction::Continue);
    }

    #[tokio::test]
    async fn test_interval_keys_clamp_at_one_second() {
        let mut app = app(paused(2));
        app.handle_key(KeyCode::Char('+')).await;
        assert_eq!(app.state.interval_secs, 3);
        assert_eq!(app.controller.config().interval_ms.get(), 3000);

        for _ in 0..5 {
            app.handle_key(KeyCode::Char('-')).await;
        }
        assert_eq!(app.state.interval_secs, 1);
        assert_eq!(app.controller.config().interval_ms.get(), 1000);
    }

    #[tokio::test]
    async fn test_auto_toggle_updates_status() {
        let mut app = app(paused(10));
        app.handle_key(KeyCode::Char('a')).await;
        assert!(app.controller.is_scheduled());
        app.drain_events();
        assert_eq!(app.state.status, RefreshStatus::Live);

        app.handle_key(KeyCode::Char('a')).await;
        assert!(!app.controller.is_scheduled());
        app.drain_events();
        assert_eq!(app.state.status, RefreshStatus::Paused);

        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_keys_do_not_block_on_a_full_event_queue() {
        let live = RefreshConfig::new(NonZeroU64::new(2000).unwrap(), true);
        let mut app = app_with_queue(live, 1);
        app.controller.start(live).await;
        app.controller.stop().await;

        // Restart queues two status events into a one-slot queue
        let handled = tokio::time::timeout(
            Duration::from_secs(1),
            app.handle_key(KeyCode::Char('a')),
        )
        .await;
        assert_eq!(handled.unwrap(), KeyAction::Continue);
        let handled = tokio::time::timeout(
            Duration::from_secs(1),
            app.handle_key(KeyCode::Char('+')),
        )
        .await;
        assert_eq!(handled.unwrap(), KeyAction::Continue);

        assert!(app.controller.is_scheduled());
        assert_eq!(app.state.status, RefreshStatus::Live);
        assert_eq!(app.state.interval_secs, 3);

        app.shutdown().await;
    }
}

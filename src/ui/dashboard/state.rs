//! Dashboard state management
//!
//! Contains the main dashboard state struct and related types

use crate::config::RefreshConfig;
use crate::consts::MAX_ACTIVITY_LOGS;
use crate::events::Event as DashboardEvent;
use crate::metrics::MarketSummary;
use crate::quotes::Snapshot;
use crate::refresh::RefreshStatus;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

/// A user-facing error shown until it expires.
#[derive(Debug, Clone)]
pub struct ErrorNotice {
    pub message: String,
    pub shown_at: Instant,
}

/// Everything the dashboard screen needs to draw itself.
#[derive(Debug)]
pub struct DashboardState {
    /// Where quotes are fetched from.
    pub endpoint: String,
    /// Auto-refresh status shown in the header.
    pub status: RefreshStatus,
    /// Current refresh period in seconds.
    pub interval_secs: u64,
    /// Latest snapshot received, if any.
    pub snapshot: Option<Arc<Snapshot>>,
    /// Summary derived from `snapshot`; `None` for an empty quote set.
    pub summary: Option<MarketSummary>,
    /// Activity logs for display
    pub activity_logs: VecDeque<DashboardEvent>,
    /// Animation tick counter
    pub tick: usize,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Fetches that have begun but not yet ended
    loading: usize,
    /// Error notification currently on screen
    error: Option<ErrorNotice>,
}

impl DashboardState {
    pub fn new(endpoint: String, config: RefreshConfig, with_background_color: bool) -> Self {
        Self {
            endpoint,
            status: RefreshStatus::Paused,
            interval_secs: config.interval_ms.get() / 1000,
            snapshot: None,
            summary: None,
            activity_logs: VecDeque::new(),
            tick: 0,
            with_background_color,
            loading: 0,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub(super) fn begin_loading(&mut self) {
        self.loading += 1;
    }

    pub(super) fn end_loading(&mut self) {
        self.loading = self.loading.saturating_sub(1);
    }

    pub(super) fn show_error(&mut self, message: String) {
        self.error = Some(ErrorNotice {
            message,
            shown_at: Instant::now(),
        });
    }

    pub(super) fn clear_error(&mut self) {
        self.error = None;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: DashboardEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }
}

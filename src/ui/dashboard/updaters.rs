//! Dashboard state update logic
//!
//! Applies refresh signals to the dashboard state

use super::state::DashboardState;

use crate::consts::refresh::error_display_duration;
use crate::events::Event as DashboardEvent;
use crate::metrics::MarketSummary;
use crate::quotes::Snapshot;
use crate::refresh::RefreshStatus;
use crate::renderer::Renderer;

use std::sync::Arc;
use std::time::Instant;

impl DashboardState {
    /// Advance the animation tick and expire stale notifications.
    pub fn update(&mut self) {
        self.tick += 1;
        self.expire_notices(Instant::now());
    }

    fn expire_notices(&mut self, now: Instant) {
        let expired = self.error().is_some_and(|notice| {
            now.saturating_duration_since(notice.shown_at) >= error_display_duration()
        });
        if expired {
            self.clear_error();
        }
    }

    pub fn set_interval_secs(&mut self, secs: u64) {
        self.interval_secs = secs;
    }
}

impl Renderer for DashboardState {
    fn loading_begin(&mut self) {
        self.begin_loading();
    }

    fn loading_end(&mut self) {
        self.end_loading();
    }

    fn data_updated(&mut self, snapshot: &Snapshot, summary: Option<&MarketSummary>) {
        self.snapshot = Some(Arc::new(snapshot.clone()));
        self.summary = summary.cloned();
    }

    fn status_changed(&mut self, status: RefreshStatus) {
        self.status = status;
    }

    fn error_occurred(&mut self, message: &str) {
        self.show_error(message.to_string());
    }

    fn record(&mut self, event: &DashboardEvent) {
        if event.should_display() {
            self.add_to_activity_log(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshConfig;
    use crate::events::Event;
    use crate::logging::LogLevel;
    use crate::metrics::tests::quote;
    use crate::renderer::dispatch;
    use chrono::DateTime;
    use std::time::Duration;

    fn state() -> DashboardState {
        DashboardState::new(
            "http://localhost:5000/api/stocks".to_string(),
            RefreshConfig::default(),
            false,
        )
    }

    #[test]
    fn test_loading_brackets_overlapping_fetches() {
        let mut state = state();
        dispatch(&mut state, &Event::loading_begin());
        dispatch(&mut state, &Event::loading_begin());
        dispatch(&mut state, &Event::loading_end());
        assert!(state.is_loading());
        dispatch(&mut state, &Event::loading_end());
        assert!(!state.is_loading());
        dispatch(&mut state, &Event::loading_end());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_data_updated_sets_snapshot_and_summary() {
        let mut state = state();
        let snapshot = Arc::new(Snapshot {
            quotes: vec![quote("AAA", 10.0, 1000)],
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        });
        dispatch(&mut state, &Event::data_updated(snapshot));

        assert_eq!(state.snapshot.as_ref().unwrap().quotes.len(), 1);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.top_performer, "AAA");
        assert_eq!(state.activity_logs.len(), 1);
    }

    #[test]
    fn test_error_notice_expires() {
        let mut state = state();
        dispatch(
            &mut state,
            &Event::error_occurred("boom".to_string(), "detail".to_string(), LogLevel::Warn),
        );
        state.update();
        assert_eq!(state.error().unwrap().message, "boom");

        let shown_at = state.error().unwrap().shown_at;
        state.expire_notices(shown_at + Duration::from_secs(4));
        assert!(state.error().is_some());

        state.expire_notices(shown_at + error_display_duration());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_status_changes() {
        let mut state = state();
        dispatch(&mut state, &Event::status_changed(RefreshStatus::Live));
        assert_eq!(state.status, RefreshStatus::Live);
    }
}

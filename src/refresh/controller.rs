//! Auto-refresh state machine
//!
//! Owns the single refresh timer. Every operation that touches the timer
//! cancels the current one before arming another, so at most one is ever live.

use super::pipeline::{FetchPipeline, FetchResult};
use super::{RefreshState, RefreshStatus};
use crate::config::RefreshConfig;
use crate::events::{Event, EventSender};
use crate::quotes::QuoteSource;
use crate::store::DashboardStore;
use log::{debug, info};
use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Handle to the running refresh timer task
struct ScheduledRefresh {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct RefreshController {
    config: RefreshConfig,
    pipeline: Arc<FetchPipeline>,
    event_sender: EventSender,
    timer: Option<ScheduledRefresh>,
    status: RefreshStatus,
}

impl RefreshController {
    pub fn new(
        config: RefreshConfig,
        source: Arc<dyn QuoteSource>,
        store: DashboardStore,
        event_sender: EventSender,
    ) -> Self {
        let pipeline = Arc::new(FetchPipeline::new(source, store, event_sender.clone()));
        Self {
            config,
            pipeline,
            event_sender,
            timer: None,
            status: RefreshStatus::Paused,
        }
    }

    pub fn config(&self) -> RefreshConfig {
        self.config
    }

    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    pub fn state(&self) -> RefreshState {
        if self.pipeline.in_flight() > 0 {
            RefreshState::Fetching
        } else if self.timer.is_some() {
            RefreshState::Scheduled
        } else {
            RefreshState::Idle
        }
    }

    /// Whether a refresh timer is currently armed.
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    pub fn store(&self) -> &DashboardStore {
        self.pipeline.store()
    }

    /// Cancel any pending timer, adopt `config`, and arm a repeating timer if
    /// auto-refresh is enabled. Calling it repeatedly leaves exactly one timer.
    pub async fn start(&mut self, config: RefreshConfig) {
        self.cancel_timer();
        self.config = config;

        if config.auto_enabled {
            self.timer = Some(self.arm(config.interval()));
            info!("Auto-refresh every {} ms", config.interval_ms);
            self.set_status(RefreshStatus::Live);
        } else {
            self.set_status(RefreshStatus::Paused);
        }
    }

    /// Cancel future scheduled fetches. In-flight fetches are left alone.
    pub async fn stop(&mut self) {
        self.cancel_timer();
        self.set_status(RefreshStatus::Paused);
    }

    /// Change the refresh period. A running timer is restarted, so the next
    /// tick comes one full new period from now.
    pub async fn set_interval(&mut self, interval_ms: NonZeroU64) {
        self.config.interval_ms = interval_ms;
        if self.timer.is_some() {
            self.stop().await;
            self.start(self.config).await;
        }
    }

    /// Turn auto-refresh on or off.
    pub async fn set_auto_refresh(&mut self, enabled: bool) {
        self.config.auto_enabled = enabled;
        if enabled {
            self.start(self.config).await;
        } else {
            self.stop().await;
        }
    }

    /// Fetch right now, independent of the timer.
    pub fn trigger_manual(&self) -> JoinHandle<FetchResult> {
        debug!("Manual refresh requested");
        self.pipeline.spawn()
    }

    /// Cancel the timer and wait for its task to finish.
    pub async fn shutdown(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
            let _ = timer.handle.await;
        }
    }

    fn arm(&self, period: Duration) -> ScheduledRefresh {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let pipeline = Arc::clone(&self.pipeline);
        let first_tick = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        // Not awaited: a slow fetch must not delay the next tick.
                        pipeline.spawn();
                    }
                }
            }
        });

        ScheduledRefresh { cancel, handle }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
        }
    }

    /// Never blocks: the renderer may be the task calling us, so a full
    /// queue drops the notification and readers fall back to [`Self::status`].
    fn set_status(&mut self, status: RefreshStatus) {
        self.status = status;
        if !self.event_sender.try_send_event(Event::status_changed(status)) {
            debug!("Event queue full, status change to {} not queued", status);
        }
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

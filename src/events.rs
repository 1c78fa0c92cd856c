//! Event System
//!
//! Signals emitted by the refresh core towards whatever renders the dashboard

use crate::logging::{LogLevel, should_log_with_env};
use crate::quotes::Snapshot;
use crate::refresh::RefreshStatus;
use chrono::Local;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Renderer-facing signal carried by an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    LoadingBegin,
    LoadingEnd,
    DataUpdated(Arc<Snapshot>),
    StatusChanged(RefreshStatus),
    ErrorOccurred(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub signal: Signal,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(signal: Signal, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            signal,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn loading_begin() -> Self {
        Self::new(
            Signal::LoadingBegin,
            "Fetching quotes...".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        )
    }

    pub fn loading_end() -> Self {
        Self::new(
            Signal::LoadingEnd,
            "Fetch finished".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        )
    }

    pub fn data_updated(snapshot: Arc<Snapshot>) -> Self {
        let msg = format!(
            "Loaded {} quotes (as of {})",
            snapshot.quotes.len(),
            snapshot.local_time_label()
        );
        Self::new(
            Signal::DataUpdated(snapshot),
            msg,
            EventType::Success,
            LogLevel::Info,
        )
    }

    pub fn status_changed(status: RefreshStatus) -> Self {
        Self::new(
            Signal::StatusChanged(status),
            format!("Auto-refresh {}", status),
            EventType::StateChange,
            LogLevel::Info,
        )
    }

    /// `message` is what the user sees, `detail` goes to the activity log.
    pub fn error_occurred(message: String, detail: String, log_level: LogLevel) -> Self {
        Self::new(
            Signal::ErrorOccurred(message),
            detail,
            EventType::Error,
            log_level,
        )
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Event sending helper shared by the controller and its pipeline
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Create a sender together with its receiving end.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }

    /// Send an event. A closed receiver means nobody renders anymore; the event is dropped.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    /// Send without waiting. Returns `false` when the queue is full or closed.
    pub fn try_send_event(&self, event: Event) -> bool {
        self.sender.try_send(event).is_ok()
    }
}

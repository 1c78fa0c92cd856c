//! Refresh scheduling
//!
//! Decides when quotes are fetched and runs each fetch through the pipeline.

pub mod controller;
pub mod pipeline;

pub use controller::RefreshController;
pub use pipeline::FetchPipeline;

/// User-visible auto-refresh status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum RefreshStatus {
    Live,
    Paused,
}

/// Scheduling state of the controller.
///
/// `Fetching` is reported while any pipeline call is in flight; it does not
/// stop the timer from firing again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum RefreshState {
    Idle,
    Scheduled,
    Fetching,
}

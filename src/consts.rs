//! Dashboard Configuration Constants
//!
//! Configuration constants for the dashboard, organized by functional area.

// =============================================================================
// QUEUE CONFIGURATION
// =============================================================================

/// The maximum number of events to keep in the activity logs.
pub const MAX_ACTIVITY_LOGS: usize = 100;

/// Maximum number of buffered events between the refresh core and the renderer
pub const EVENT_QUEUE_SIZE: usize = 100;

// =============================================================================
// REFRESH CONFIGURATION
// =============================================================================

pub mod refresh {
    use std::time::Duration;

    /// Default auto-refresh period (milliseconds)
    pub const DEFAULT_INTERVAL_MS: u64 = 10_000;

    /// Whether auto-refresh is on when nothing else is configured
    pub const DEFAULT_AUTO_REFRESH: bool = true;

    /// How long a user-facing error notification stays visible (seconds)
    pub const ERROR_DISPLAY_SECS: u64 = 5;

    /// Message shown to the user when a refresh fails
    pub const FETCH_ERROR_MESSAGE: &str = "Failed to load stock data. Please try again.";

    pub const fn error_display_duration() -> Duration {
        Duration::from_secs(ERROR_DISPLAY_SECS)
    }
}

// =============================================================================
// NETWORK CONFIGURATION
// =============================================================================

pub mod http {
    use std::time::Duration;

    /// Quote endpoint served by the bundled market data server
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/stocks";

    /// Environment variable that overrides the configured endpoint
    pub const ENDPOINT_ENV_VAR: &str = "QUOTE_DASHBOARD_URL";

    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;

    pub const fn request_timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    pub const fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

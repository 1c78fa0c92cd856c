//! Session start and shutdown banners

use crate::cli_messages::{Tone, print_line};
use crate::config::RefreshConfig;

/// What is polled and how often, shown after `Starting <mode> mode`.
pub fn session_starting_details(endpoint: &str, config: &RefreshConfig) -> String {
    let secs = config.interval().as_secs();
    if config.auto_enabled {
        format!("polling {} every {}s", endpoint, secs)
    } else {
        format!(
            "polling {} on demand, auto-refresh paused ({}s when enabled)",
            endpoint, secs
        )
    }
}

pub fn print_session_starting(mode: &str, endpoint: &str, config: &RefreshConfig) {
    print_line(
        Tone::Info,
        &format!("Starting {} mode", mode),
        &session_starting_details(endpoint, config),
    );
}

pub fn print_session_shutdown() {
    print_line(Tone::Info, "Stopping refresh timer...", "");
}

pub fn print_session_exit_success() {
    print_line(Tone::Success, "Quote dashboard exited", "");
}

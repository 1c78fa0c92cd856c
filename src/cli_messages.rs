//! Console output for the one-shot commands and session banners
//!
//! Every line is `[TAG] title<TAB>details`, colored by [`Tone`].

use crate::consts::refresh::FETCH_ERROR_MESSAGE;
use crate::quotes::error::QuoteSourceError;

const COLOR_RESET: &str = "\x1b[0m";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "INFO",
            Tone::Warn => "WARN",
            Tone::Error => "ERROR",
            Tone::Success => "SUCCESS",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[1;36m",
            Tone::Warn => "\x1b[1;33m",
            Tone::Error => "\x1b[1;31m",
            Tone::Success => "\x1b[1;32m",
        }
    }
}

pub fn format_line(tone: Tone, title: &str, details: &str) -> String {
    let mut line = format!("{}[{}]{} {}", tone.color(), tone.tag(), COLOR_RESET, title);
    if !details.is_empty() {
        line.push('\t');
        line.push_str(details);
    }
    line
}

pub fn print_line(tone: Tone, title: &str, details: &str) {
    println!("{}", format_line(tone, title, details));
}

/// The user-facing fetch failure, followed by the error's category and cause.
pub fn fetch_error_lines(error: &QuoteSourceError) -> [String; 2] {
    [
        format_line(Tone::Error, FETCH_ERROR_MESSAGE, ""),
        format_line(Tone::Error, &format!("{} error", error.kind()), &error.to_string()),
    ]
}

pub fn print_fetch_error(error: &QuoteSourceError) {
    for line in fetch_error_lines(error) {
        println!("{}", line);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Info, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Warn, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tone::Success, $title, &format!($($details)*))
    };
}

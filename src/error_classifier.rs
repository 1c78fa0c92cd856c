use crate::logging::LogLevel;
use crate::quotes::error::QuoteSourceError;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &QuoteSourceError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            QuoteSourceError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            QuoteSourceError::Http { status, .. } if (500..=599).contains(status) => {
                LogLevel::Warn
            }

            // Critical: Auth, malformed responses
            QuoteSourceError::Http { status, .. } if *status == 401 => LogLevel::Error,
            QuoteSourceError::Http { status, .. } if *status == 403 => LogLevel::Error,
            QuoteSourceError::Decode(_) | QuoteSourceError::Validation(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> QuoteSourceError {
        QuoteSourceError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_fetch_error() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_fetch_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_fetch_error(&http(502)), LogLevel::Warn);
        assert_eq!(classifier.classify_fetch_error(&http(403)), LogLevel::Error);
        assert_eq!(classifier.classify_fetch_error(&http(404)), LogLevel::Warn);
        assert_eq!(
            classifier.classify_fetch_error(&QuoteSourceError::Validation("x".into())),
            LogLevel::Error
        );
    }
}

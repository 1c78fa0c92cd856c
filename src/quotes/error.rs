//! Error handling for the quotes module

use thiserror::Error;

/// Broad failure category, used for diagnostics and log classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// A response arrived but had a failing status or an undecodable body.
    Protocol,
    /// The body decoded but did not satisfy the success contract.
    Validation,
}

#[derive(Debug, Error)]
pub enum QuoteSourceError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The body was not valid JSON for the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload parsed but failed the `status`/`stocks` contract.
    #[error("Invalid response format: {0}")]
    Validation(String),
}

impl QuoteSourceError {
    pub async fn from_response(response: reqwest::Response) -> QuoteSourceError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        QuoteSourceError::Http { status, message }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteSourceError::Reqwest(e) if e.is_decode() => ErrorKind::Protocol,
            QuoteSourceError::Reqwest(_) => ErrorKind::Transport,
            QuoteSourceError::Http { .. } | QuoteSourceError::Decode(_) => ErrorKind::Protocol,
            QuoteSourceError::Validation(_) => ErrorKind::Validation,
        }
    }
}

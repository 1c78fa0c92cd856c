use crate::quotes::error::QuoteSourceError;
use crate::quotes::model::QuotesResponse;

pub(crate) mod client;
pub use client::HttpQuoteSource;
pub mod error;
pub mod model;

pub use model::{Quote, Snapshot};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    /// Where quotes are fetched from, for display and diagnostics.
    fn endpoint(&self) -> &str;

    /// Request the current quote list. The payload is returned unvalidated.
    async fn fetch_quotes(&self) -> Result<QuotesResponse, QuoteSourceError>;
}

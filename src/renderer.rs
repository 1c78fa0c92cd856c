//! Renderer seam
//!
//! The refresh core only emits [`Event`]s. Anything that displays the
//! dashboard implements [`Renderer`] and feeds received events through
//! [`dispatch`], which also derives the market summary for fresh data.

use crate::events::{Event, Signal};
use crate::metrics::MarketSummary;
use crate::quotes::Snapshot;
use crate::refresh::RefreshStatus;
use log::debug;

pub trait Renderer {
    fn loading_begin(&mut self);

    fn loading_end(&mut self);

    /// `summary` is `None` when the snapshot holds no quotes.
    fn data_updated(&mut self, snapshot: &Snapshot, summary: Option<&MarketSummary>);

    fn status_changed(&mut self, status: RefreshStatus);

    fn error_occurred(&mut self, message: &str);

    /// Every event, before its signal is handled. Used for activity logs.
    fn record(&mut self, _event: &Event) {}
}

pub fn dispatch<R: Renderer + ?Sized>(renderer: &mut R, event: &Event) {
    renderer.record(event);
    match &event.signal {
        Signal::LoadingBegin => renderer.loading_begin(),
        Signal::LoadingEnd => renderer.loading_end(),
        Signal::DataUpdated(snapshot) => {
            let summary = match MarketSummary::from_quotes(&snapshot.quotes) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    debug!("No market summary: {}", e);
                    None
                }
            };
            renderer.data_updated(snapshot, summary.as_ref());
        }
        Signal::StatusChanged(status) => renderer.status_changed(*status),
        Signal::ErrorOccurred(message) => renderer.error_occurred(message),
    }
}

//! Single fetch attempt: request, validate, store, signal

use crate::consts::refresh::FETCH_ERROR_MESSAGE;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventSender};
use crate::quotes::error::QuoteSourceError;
use crate::quotes::{QuoteSource, Snapshot};
use crate::store::DashboardStore;
use futures::FutureExt;
use log::debug;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinHandle;

pub type FetchResult = Result<Arc<Snapshot>, QuoteSourceError>;

/// Fetch pipeline shared by the refresh timer and manual triggers.
///
/// Calls are not serialized: two overlapping runs both write the store, and
/// whichever resolves last wins.
pub struct FetchPipeline {
    source: Arc<dyn QuoteSource>,
    store: DashboardStore,
    event_sender: EventSender,
    error_classifier: ErrorClassifier,
    in_flight: AtomicUsize,
}

/// Counts a run as in flight until dropped, including on panic.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FetchPipeline {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        store: DashboardStore,
        event_sender: EventSender,
    ) -> Self {
        Self {
            source,
            store,
            event_sender,
            error_classifier: ErrorClassifier::new(),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    /// Number of runs currently waiting on the quote source.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run the pipeline on its own task.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<FetchResult> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move { pipeline.run().await })
    }

    /// One fetch attempt. Emits loading-begin, then data-updated or error,
    /// then loading-end; loading-end is sent even if the fetch panics.
    pub async fn run(&self) -> FetchResult {
        let _guard = InFlightGuard::new(&self.in_flight);
        self.event_sender.send_event(Event::loading_begin()).await;

        let outcome = AssertUnwindSafe(self.fetch_and_store())
            .catch_unwind()
            .await;

        self.event_sender.send_event(Event::loading_end()).await;

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn fetch_and_store(&self) -> FetchResult {
        let fetched = match self.source.fetch_quotes().await {
            Ok(response) => response.into_snapshot(),
            Err(e) => Err(e),
        };

        match fetched {
            Ok(snapshot) => {
                let snapshot = self.store.replace(snapshot).await;
                debug!(
                    "Stored snapshot with {} quotes from {}",
                    snapshot.quotes.len(),
                    snapshot.timestamp
                );
                self.event_sender
                    .send_event(Event::data_updated(snapshot.clone()))
                    .await;
                Ok(snapshot)
            }
            Err(e) => {
                let log_level = self.error_classifier.classify_fetch_error(&e);
                log::log!(
                    log_level.into(),
                    "Error loading stock data ({}): {}",
                    e.kind(),
                    e
                );
                self.event_sender
                    .send_event(Event::error_occurred(
                        FETCH_ERROR_MESSAGE.to_string(),
                        format!("Failed to load stock data: {}", e),
                        log_level,
                    ))
                    .await;
                Err(e)
            }
        }
    }
}

//! Latest quote snapshot shared between the refresh pipeline and readers.

use crate::quotes::Snapshot;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the most recent successful snapshot.
///
/// Snapshots are replaced whole, so a reader always sees quotes and timestamp
/// from the same fetch.
#[derive(Clone, Debug, Default)]
pub struct DashboardStore {
    inner: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot and returns the shared handle to it.
    pub async fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        *self.inner.write().await = Some(snapshot.clone());
        snapshot
    }

    /// The current snapshot, if any fetch has succeeded yet.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.read().await.clone()
    }

    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.as_ref().map(|s| s.timestamp)
    }
}

//! Host records and the shared snapshot handle.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One entry in the inventory: a stable identifier and its labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Stable identifier assigned by the inventory service.
    pub uuid: String,
    /// Label key to label value.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// An immutable, point-in-time view of all known hosts.
///
/// A snapshot is never mutated after publication; a refresh always
/// builds and publishes a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSnapshot {
    /// Inventory version token this snapshot was fetched at.
    pub version: String,
    pub hosts: Vec<HostRecord>,
}

/// Shared handle to the current snapshot.
///
/// Readers clone the inner `Arc`; the watcher swaps in a whole new one.
/// The lock is held only for the instant of the clone or the swap, never
/// across a filtering pass, so concurrent readers keep whatever snapshot
/// they captured even while a refresh lands.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    current: Arc<RwLock<Arc<HostSnapshot>>>,
}

impl SnapshotHandle {
    /// Create a handle holding an empty initial snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot as of this instant.
    pub async fn current(&self) -> Arc<HostSnapshot> {
        self.current.read().await.clone()
    }

    /// Replace the published snapshot wholesale.
    pub async fn publish(&self, snapshot: HostSnapshot) {
        *self.current.write().await = Arc::new(snapshot);
    }
}

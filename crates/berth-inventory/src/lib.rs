//! berth-inventory: the host inventory watcher.
//!
//! Owns the authoritative view of known hosts. A background watcher
//! long-polls the external metadata service for version changes and, on
//! each change, fetches the full host list and publishes it as a new
//! immutable snapshot. Filtering passes read one snapshot for their
//! whole duration and are never exposed to a half-refreshed view.
//!
//! # Components
//!
//! - **`snapshot`** - `HostRecord`, `HostSnapshot`, and the shared
//!   `SnapshotHandle` (whole-value replace, never in-place mutation)
//! - **`client`** - hyper client for the versioned long-poll and host
//!   listing endpoints
//! - **`retry`** - bounded exponential-backoff retry
//! - **`watcher`** - the poll/update loop

pub mod client;
pub mod error;
pub mod retry;
pub mod snapshot;
pub mod watcher;

pub use client::MetadataClient;
pub use error::{InventoryError, InventoryResult};
pub use retry::{RetryPolicy, retry};
pub use snapshot::{HostRecord, HostSnapshot, SnapshotHandle};
pub use watcher::InventoryWatcher;

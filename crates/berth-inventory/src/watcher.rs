//! The inventory watcher loop.
//!
//! Long-polls the metadata service for version changes and republishes
//! the host snapshot whenever the version moves. Both the poll and the
//! host fetch run under the bounded retry policy; exhausting it ends
//! this watcher run with an error. The supervising caller decides
//! whether to restart or give up - the watcher itself never keeps
//! serving a snapshot it can no longer refresh.

use std::sync::Arc;

use berth_metrics::Counters;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::client::MetadataClient;
use crate::error::InventoryResult;
use crate::retry::{RetryPolicy, retry};
use crate::snapshot::{HostSnapshot, SnapshotHandle};

/// Version token sent on the first poll, before anything is known.
const INITIAL_VERSION: &str = "init";

/// Server-side wait ceiling for one long-poll, in seconds.
const POLL_MAX_WAIT_SECS: u64 = 5;

/// Keeps the published host snapshot fresh.
pub struct InventoryWatcher {
    client: MetadataClient,
    snapshots: SnapshotHandle,
    counters: Arc<Counters>,
    policy: RetryPolicy,
    max_wait_secs: u64,
    version: String,
}

impl InventoryWatcher {
    pub fn new(client: MetadataClient, snapshots: SnapshotHandle, counters: Arc<Counters>) -> Self {
        Self {
            client,
            snapshots,
            counters,
            policy: RetryPolicy::default(),
            max_wait_secs: POLL_MAX_WAIT_SECS,
            version: INITIAL_VERSION.to_string(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the poll/update loop until shutdown or retry exhaustion.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> InventoryResult<()> {
        info!("subscribed to inventory changes");

        loop {
            tokio::select! {
                result = self.poll_once() => result?,
                _ = shutdown.changed() => {
                    info!("inventory watcher shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// One long-poll cycle: wait for a version change, then refresh.
    async fn poll_once(&mut self) -> InventoryResult<()> {
        let client = &self.client;
        let current = self.version.clone();
        let max_wait = self.max_wait_secs;

        let new_version =
            retry(self.policy, || client.wait_version(&current, max_wait)).await?;

        if new_version == self.version {
            debug!("no change in inventory version");
            return Ok(());
        }

        debug!(old = %self.version, new = %new_version, "inventory version changed");

        let hosts = retry(self.policy, || client.list_hosts()).await?;
        let count = hosts.len();
        self.snapshots
            .publish(HostSnapshot {
                version: new_version.clone(),
                hosts,
            })
            .await;
        self.version = new_version;
        self.counters.inc_inventory_refresh();

        debug!(hosts = count, "inventory snapshot published");
        Ok(())
    }
}

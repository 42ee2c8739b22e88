//! The placement advisor.
//!
//! One prioritize pass is stateless: it captures the snapshot current at
//! its start, derives each instance's host-OS constraint, then parses,
//! orders, and applies the declared constraints. Nothing survives the
//! reply, and concurrent passes share nothing but their snapshot Arcs.

use std::sync::Arc;

use berth_affinity::{collect_affinities, filter_hosts, inject_os_constraint, order_constraints};
use berth_inventory::SnapshotHandle;
use berth_metrics::Counters;
use tracing::debug;

use crate::request::SchedulerRequest;

/// Computes placement advice against the current host snapshot.
pub struct PlacementAdvisor {
    snapshots: SnapshotHandle,
    counters: Arc<Counters>,
}

impl PlacementAdvisor {
    pub fn new(snapshots: SnapshotHandle, counters: Arc<Counters>) -> Self {
        Self {
            snapshots,
            counters,
        }
    }

    /// Narrow the current host set to the candidates satisfying `request`.
    ///
    /// Returns the surviving host identifiers, sorted.
    pub async fn prioritize(&self, mut request: SchedulerRequest) -> Vec<String> {
        self.counters.inc_prioritize();
        let snapshot = self.snapshots.current().await;

        for instance in &mut request.instances {
            inject_os_constraint(instance.labels_mut());
        }

        let mut constraints =
            collect_affinities(request.instances.iter().map(|i| i.labels()));
        order_constraints(&mut constraints);

        let candidates = filter_hosts(snapshot.hosts.clone(), &constraints);
        debug!(
            constraints = constraints.len(),
            candidates = candidates.len(),
            total = snapshot.hosts.len(),
            "placement candidates computed"
        );

        let mut ids: Vec<String> = candidates.into_iter().map(|h| h.uuid).collect();
        ids.sort_unstable();
        ids
    }

    /// Reservations are not tracked; decisions are stateless.
    pub fn reserve(&self) {
        self.counters.inc_reserve();
    }

    /// Releases are not tracked; decisions are stateless.
    pub fn release(&self) {
        self.counters.inc_release();
    }

    /// Transport liveness probe.
    pub fn ping(&self) {
        self.counters.inc_ping();
    }
}

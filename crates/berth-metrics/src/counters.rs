//! Counters collector.
//!
//! Tracks how many transport events of each kind have been handled and
//! how many inventory refreshes the watcher has published. Counters are
//! plain atomics; readers take a consistent-enough snapshot for the
//! stats endpoint and the periodic log line.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

/// Counters shared between the event router, the inventory watcher,
/// and the stats surface.
#[derive(Debug, Default)]
pub struct Counters {
    prioritize: AtomicU64,
    reserve: AtomicU64,
    release: AtomicU64,
    ping: AtomicU64,
    inventory_refresh: AtomicU64,
}

/// Point-in-time view of all counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub event: EventCounts,
    pub inventory: InventoryCounts,
}

/// Transport events handled, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub prioritize: u64,
    pub reserve: u64,
    pub release: u64,
    pub ping: u64,
}

/// Inventory watcher activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCounts {
    pub refresh: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_prioritize(&self) {
        self.prioritize.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_reserve(&self) {
        self.reserve.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_release(&self) {
        self.release.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ping(&self) {
        self.ping.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_inventory_refresh(&self) {
        self.inventory_refresh.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            event: EventCounts {
                prioritize: self.prioritize.load(Ordering::Relaxed),
                reserve: self.reserve.load(Ordering::Relaxed),
                release: self.release.load(Ordering::Relaxed),
                ping: self.ping.load(Ordering::Relaxed),
            },
            inventory: InventoryCounts {
                refresh: self.inventory_refresh.load(Ordering::Relaxed),
            },
        }
    }

    /// Emit one stats log line.
    pub fn log(&self) {
        let snapshot = self.snapshot();
        info!(
            event_prioritize = snapshot.event.prioritize,
            event_reserve = snapshot.event.reserve,
            event_release = snapshot.event.release,
            event_ping = snapshot.event.ping,
            inventory_refresh = snapshot.inventory.refresh,
            "stats"
        );
    }

    /// Run the periodic stats log loop until the shutdown signal.
    ///
    /// Logs a final line on shutdown so the last window is not lost.
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = interval.as_secs(), "stats logger started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => self.log(),
                _ = shutdown.changed() => {
                    self.log();
                    info!("stats logger shutting down");
                    break;
                }
            }
        }
    }
}

//! berth-metrics: counters for the placement-advisory daemon.
//!
//! The collector is an injected dependency, constructed once in the
//! daemon and handed to the components that record into it. There is no
//! process-global state; tests construct their own instance.
//!
//! - **`counters`** - atomic event/inventory counters and the periodic
//!   stats log loop
//! - **`prometheus`** - text exposition of a counter snapshot

pub mod counters;
pub mod prometheus;

pub use counters::{Counters, CountersSnapshot, EventCounts, InventoryCounts};
pub use prometheus::render_prometheus;

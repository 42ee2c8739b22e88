//! Prometheus text exposition format.
//!
//! Renders a counter snapshot into the Prometheus text exposition
//! format for scraping by a Prometheus server or compatible agent.

use crate::counters::CountersSnapshot;

/// Render a counter snapshot into Prometheus text format.
pub fn render_prometheus(snapshot: &CountersSnapshot) -> String {
    let mut out = String::new();

    out.push_str("# HELP berth_events_total Transport events handled, by kind.\n");
    out.push_str("# TYPE berth_events_total counter\n");
    let kinds = [
        ("prioritize", snapshot.event.prioritize),
        ("reserve", snapshot.event.reserve),
        ("release", snapshot.event.release),
        ("ping", snapshot.event.ping),
    ];
    for (kind, value) in kinds {
        out.push_str(&format!("berth_events_total{{kind=\"{kind}\"}} {value}\n"));
    }

    out.push_str("# HELP berth_inventory_refreshes_total Inventory snapshots published by the watcher.\n");
    out.push_str("# TYPE berth_inventory_refreshes_total counter\n");
    out.push_str(&format!(
        "berth_inventory_refreshes_total {}\n",
        snapshot.inventory.refresh
    ));

    out
}

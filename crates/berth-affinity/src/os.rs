//! Host operating system requirement.
//!
//! Every instance in a placement request needs a host running the right
//! operating system. The requirement is expressed as one more hard
//! host-label constraint injected into the instance's own label map, so
//! it flows through the same parse/order/filter pipeline as the
//! user-declared constraints.

use std::collections::HashMap;

use tracing::debug;

use crate::parser::AFFINITY_LABEL_PREFIX;

/// Host label naming the operating system the host runs.
pub const HOST_OS_LABEL: &str = "io.rancher.host.os";

/// Instance label marking infrastructure (system) containers.
pub const SYSTEM_CONTAINER_LABEL: &str = "io.rancher.container.system";

/// The operating system an instance must land on.
///
/// System containers run the infrastructure stack and require `linux`;
/// everything else is a user workload and requires `windows`.
pub fn required_os(labels: &HashMap<String, String>) -> &'static str {
    if labels.contains_key(SYSTEM_CONTAINER_LABEL) {
        "linux"
    } else {
        "windows"
    }
}

/// Inject the hard host-OS constraint into an instance's label map.
pub fn inject_os_constraint(labels: &mut HashMap<String, String>) {
    let os = required_os(labels);
    debug!(os, "derived host os requirement");

    add_label(
        labels,
        &format!("{AFFINITY_LABEL_PREFIX}:host_label"),
        &format!("{HOST_OS_LABEL}={os}"),
    );
}

/// Append `value` to a multi-value label, comma-separated when the key
/// already carries values.
fn add_label(labels: &mut HashMap<String, String>, key: &str, value: &str) {
    match labels.get_mut(key) {
        Some(existing) => {
            existing.push(',');
            existing.push_str(value);
        }
        None => {
            labels.insert(key.to_string(), value.to_string());
        }
    }
}

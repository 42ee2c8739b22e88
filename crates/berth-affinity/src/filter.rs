//! The candidate-narrowing filter.

use berth_inventory::HostRecord;
use tracing::debug;

use crate::constraint::{AffinityConstraint, AffinityRule};

/// Apply an ordered constraint list to a candidate host set.
///
/// A strict left fold: each constraint narrows the set produced by the
/// one before it. A hard constraint replaces the candidate set with the
/// viable subset unconditionally, even when that subset is empty. A soft
/// constraint whose viable subset would be empty is ignored and leaves
/// the set unchanged.
pub fn filter_hosts(
    mut candidates: Vec<HostRecord>,
    constraints: &[AffinityConstraint],
) -> Vec<HostRecord> {
    for constraint in constraints {
        let AffinityRule::HostLabel { key, value } = &constraint.rule else {
            debug!(
                kind = constraint.rule.kind(),
                "affinity kind not implemented, skipping"
            );
            continue;
        };

        let next: Vec<HostRecord> = candidates
            .iter()
            .filter(|host| {
                let matches = host.labels.get(key).is_some_and(|v| v == value);
                constraint.anti ^ matches
            })
            .cloned()
            .collect();

        if !constraint.soft || !next.is_empty() {
            candidates = next;
        } else {
            debug!(%constraint, "unsatisfiable soft constraint ignored");
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(uuid: &str, labels: &[(&str, &str)]) -> HostRecord {
        HostRecord {
            uuid: uuid.to_string(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn three_hosts() -> Vec<HostRecord> {
        vec![
            host("h1", &[("zone", "a")]),
            host("h2", &[("zone", "b")]),
            host("h3", &[]),
        ]
    }

    fn host_label(key: &str, value: &str, soft: bool, anti: bool) -> AffinityConstraint {
        AffinityConstraint {
            rule: AffinityRule::HostLabel {
                key: key.to_string(),
                value: value.to_string(),
            },
            soft,
            anti,
        }
    }

    fn uuids(hosts: &[HostRecord]) -> Vec<&str> {
        hosts.iter().map(|h| h.uuid.as_str()).collect()
    }

    #[test]
    fn empty_constraint_list_returns_input_unchanged() {
        let result = filter_hosts(three_hosts(), &[]);
        assert_eq!(uuids(&result), ["h1", "h2", "h3"]);
    }

    #[test]
    fn hard_affinity_keeps_only_matching_hosts() {
        let result = filter_hosts(three_hosts(), &[host_label("zone", "a", false, false)]);
        assert_eq!(uuids(&result), ["h1"]);
    }

    #[test]
    fn hard_constraint_can_eliminate_all_hosts() {
        let result = filter_hosts(three_hosts(), &[host_label("zone", "c", false, false)]);
        assert!(result.is_empty());
    }

    #[test]
    fn unsatisfiable_soft_constraint_is_ignored() {
        let result = filter_hosts(three_hosts(), &[host_label("zone", "c", true, false)]);
        assert_eq!(uuids(&result), ["h1", "h2", "h3"]);
    }

    #[test]
    fn satisfiable_soft_constraint_still_narrows() {
        let result = filter_hosts(three_hosts(), &[host_label("zone", "b", true, false)]);
        assert_eq!(uuids(&result), ["h2"]);
    }

    #[test]
    fn anti_affinity_inverts_polarity() {
        let result = filter_hosts(three_hosts(), &[host_label("zone", "a", false, true)]);
        // Hosts without zone=a are viable, including the unlabeled one.
        assert_eq!(uuids(&result), ["h2", "h3"]);
    }

    #[test]
    fn label_value_must_match_exactly() {
        let hosts = vec![host("h1", &[("zone", "aa")]), host("h2", &[("zone", "a")])];
        let result = filter_hosts(hosts, &[host_label("zone", "a", false, false)]);
        assert_eq!(uuids(&result), ["h2"]);
    }

    #[test]
    fn constraints_fold_left_to_right() {
        let hosts = vec![
            host("h1", &[("zone", "a"), ("ssd", "true")]),
            host("h2", &[("zone", "a")]),
            host("h3", &[("ssd", "true")]),
        ];
        let constraints = [
            host_label("zone", "a", false, false),
            host_label("ssd", "true", false, false),
        ];

        let result = filter_hosts(hosts, &constraints);
        assert_eq!(uuids(&result), ["h1"]);
    }

    #[test]
    fn soft_constraint_applies_to_already_narrowed_set() {
        let hosts = vec![
            host("h1", &[("zone", "a"), ("ssd", "true")]),
            host("h2", &[("ssd", "true")]),
        ];
        // The hard constraint narrows to h1; the soft one would leave
        // nothing within that set, so it is ignored there.
        let constraints = [
            host_label("zone", "a", false, false),
            host_label("gpu", "true", true, false),
        ];

        let result = filter_hosts(hosts, &constraints);
        assert_eq!(uuids(&result), ["h1"]);
    }

    #[test]
    fn container_kinds_are_inert() {
        let constraints = [
            AffinityConstraint {
                rule: AffinityRule::ContainerLabel {
                    expr: "tier=web".to_string(),
                },
                soft: false,
                anti: false,
            },
            AffinityConstraint {
                rule: AffinityRule::ContainerName {
                    name: "db".to_string(),
                },
                soft: false,
                anti: true,
            },
        ];

        let result = filter_hosts(three_hosts(), &constraints);
        assert_eq!(uuids(&result), ["h1", "h2", "h3"]);
    }

    #[test]
    fn unlabeled_hosts_do_not_match_affinity() {
        let hosts = vec![host("h1", &[])];
        let result = filter_hosts(hosts, &[host_label("zone", "a", false, false)]);
        assert!(result.is_empty());
    }

    #[test]
    fn empty_input_stays_empty() {
        let result = filter_hosts(Vec::new(), &[host_label("zone", "a", true, false)]);
        assert!(result.is_empty());
    }
}

//! Evaluation precedence over a constraint list.

use crate::constraint::AffinityConstraint;

/// Sort a constraint list into evaluation order.
///
/// Hard constraints run before soft ones, and host-label rules before
/// container rules. The sort is stable on the priority tuple
/// `(soft, is_container_kind)`, so pairs the precedence does not relate
/// keep their input order. Cheap, implemented hard rules narrow the
/// candidate set before any best-effort rule is attempted.
pub fn order_constraints(constraints: &mut [AffinityConstraint]) {
    constraints.sort_by_key(|c| (c.soft, c.rule.is_container_kind()));
}

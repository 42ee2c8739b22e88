//! berth-affinity: the affinity constraint model and filtering engine.
//!
//! Instances declare placement rules through specially-formed labels.
//! This crate parses those labels into typed constraints, imposes the
//! evaluation precedence over them, and applies them to narrow a host
//! snapshot down to the viable candidates.
//!
//! # Components
//!
//! - **`constraint`** - the tagged-variant rule model; only the
//!   host-label variant carries evaluation data
//! - **`parser`** - label grammar to constraints
//! - **`order`** - evaluation precedence (hard before soft, host-label
//!   before container kinds among soft)
//! - **`filter`** - the candidate-narrowing left fold
//! - **`os`** - per-instance host operating system requirement, injected
//!   as one more host-label constraint

pub mod constraint;
pub mod error;
pub mod filter;
pub mod order;
pub mod os;
pub mod parser;

pub use constraint::{AffinityConstraint, AffinityRule};
pub use error::{AffinityError, AffinityResult};
pub use filter::filter_hosts;
pub use order::order_constraints;
pub use os::{HOST_OS_LABEL, SYSTEM_CONTAINER_LABEL, inject_os_constraint, required_os};
pub use parser::{AFFINITY_LABEL_PREFIX, AffinityTemplate, collect_affinities, parse_affinity_label};

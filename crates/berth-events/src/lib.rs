//! berth-events: the request/reply side of the placement advisor.
//!
//! The transport delivers events named `scheduler.prioritize`,
//! `scheduler.reserve`, `scheduler.release`, and `ping`. Prioritize
//! events carry a placement request; the advisor narrows the current
//! host snapshot against it and the reply carries the surviving host
//! identifiers. Reserve and release are acknowledged without
//! computation - placement decisions are stateless, so there is no
//! reservation ledger to keep.
//!
//! # Components
//!
//! - **`event`** - the transport envelope and reply wire types
//! - **`request`** - the typed placement request and its decode
//! - **`advisor`** - snapshot capture, OS derivation, parse, order, filter
//! - **`router`** - event-name dispatch with a fixed-size worker pool

pub mod advisor;
pub mod error;
pub mod event;
pub mod request;
pub mod router;

pub use advisor::PlacementAdvisor;
pub use error::{EventError, EventResult};
pub use event::{Event, Reply};
pub use request::{Instance, SchedulerRequest, decode_request};
pub use router::EventRouter;

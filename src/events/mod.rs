//! # Events and delivery sinks.
//!
//! An [`Event`] pairs a payload with the [`Name`](crate::Name) of the
//! source that emitted it. An [`Outlet`] is the sink capability a
//! subscriber installs per source; every event from that source is handed
//! to it, synchronously, on the publishing thread.

mod event;
mod outlet;

pub use event::Event;
pub use outlet::{Outlet, OutletFn};

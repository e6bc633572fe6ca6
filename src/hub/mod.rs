//! # The dispatch engine.
//!
//! [`Hub`] owns a lock-free, self-pruning list of subscriptions and fans
//! every published event out to the live ones, synchronously, on the
//! publishing thread. [`Inlet`] is a publish handle bound to one source.
//!
//! ## Structure
//! ```text
//!  Inlet(source) ──emit──► Hub ──► entry ──► entry ──► entry ──► ∅
//!                                    │          │(tombstone,
//!                                    │          │ spliced out)
//!                                    ▼          ▼
//!                               membership     (none)
//!                            per-source cache
//!                              │         │
//!                              ▼         ▼
//!                         outlet A   outlet B
//! ```
//!
//! Entries are prepended on subscribe and tombstoned on cancel (or after
//! a delivery failure); dispatch passes splice tombstones out while they
//! walk, so the list compacts itself without a separate sweep.

pub(crate) mod entry;
pub(crate) mod membership;

mod core;
mod inlet;

pub use self::core::Hub;
pub use inlet::Inlet;

//! # fanhub
//!
//! **fanhub** is a lock-free, in-process publish/subscribe hub for Rust.
//!
//! Producers emit typed events tagged with an interned source [`Name`];
//! each subscriber lazily builds one private delivery channel per distinct
//! source it observes. The crate is designed as a building block for
//! meters, collectors and other per-source aggregation pipelines.
//!
//! ## Architecture
//! ```text
//!  producer A ──► Inlet(a) ──┐
//!  producer B ──► Inlet(b) ──┼──► Hub ──► entry ──► entry ──► entry ──► ∅
//!  producer C ──► Inlet(c) ──┘          (newest)  (tombstone,  (oldest)
//!                                           │      spliced out
//!                                           │      in-pass)
//!                                           ▼
//!                                      membership
//!                                  per-source outlets
//!                                  ┌───────┼────────┐
//!                                  ▼       ▼        ▼
//!                              outlet(a) outlet(b) (none: c
//!                                                  discarded)
//! ```
//!
//! A [`Hub`] owns a lock-free singly linked list of subscriptions. On
//! first contact with a source, a subscription's [`Subscriber`] callback
//! runs once and may install an [`Outlet`] for that source through a
//! one-shot [`Registrar`]; the decision is cached for the life of the
//! subscription. Dispatch walks the list, delivers one shared [`Event`]
//! to every live entry, and splices out cancelled entries in the same
//! pass.
//!
//! ## Guarantees
//! | Property | Description |
//! |----------|-------------|
//! | **Fan-out** | One publish delivers the same event instance to every live subscription, newest first. |
//! | **Lazy payloads** | [`Hub::publish_with`] runs its supplier at most once, and never without a live subscriber. |
//! | **Per-source channels** | Registration runs exactly once per distinct source per subscription, even under concurrent first contact. |
//! | **Self-pruning** | Cancelled subscriptions are unlinked by the next dispatch pass; no separate sweep. |
//! | **Fault isolation** | A failing or panicking subscriber is cancelled and reported out-of-band; publishers and other subscribers are unaffected. |
//!
//! Dispatch is synchronous on the publishing thread: there is no queue,
//! no backpressure and no cross-publish ordering. A slow outlet stalls
//! its publisher, so subscribers must keep delivery short.
//!
//! ## Example
//! ```rust
//! use fanhub::{Hub, Name};
//! use std::sync::{Arc, Mutex};
//!
//! fn main() -> Result<(), fanhub::NameError> {
//!     let hub: Hub<u64> = Hub::new();
//!
//!     // Collect load readings, ignore everything else.
//!     let readings = Arc::new(Mutex::new(Vec::new()));
//!     let sink = Arc::clone(&readings);
//!     let _sub = hub.subscribe_fn(move |source, registrar| {
//!         if source.segment() == "load" {
//!             let sink = Arc::clone(&sink);
//!             registrar.register_fn(move |event| {
//!                 sink.lock().unwrap().push(*event.payload());
//!                 Ok(())
//!             });
//!         }
//!         Ok(())
//!     });
//!
//!     let load = hub.inlet(Name::parse("host.cpu.load")?);
//!     let temp = hub.inlet(Name::parse("host.cpu.temp")?);
//!
//!     load.emit(12);
//!     temp.emit(55); // discarded: no outlet registered for this source
//!     load.emit_with(|| 17);
//!
//!     assert_eq!(*readings.lock().unwrap(), [12, 17]);
//!     Ok(())
//! }
//! ```

mod env;
mod error;
mod events;
mod hub;
mod names;
mod subscribers;

// ---- Public re-exports ----

pub use env::{Environment, FromValue, Lookup, Value, Variable};
pub use error::{DeliveryError, DeliveryResult, HubError, NameError};
pub use events::{Event, Outlet, OutletFn};
pub use hub::{Hub, Inlet};
pub use names::{Ancestry, Name};
pub use subscribers::{Registrar, Subscriber, SubscriberFn, Subscription};

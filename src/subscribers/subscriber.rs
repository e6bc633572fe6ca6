//! # Core subscriber trait.
//!
//! `Subscriber` is the extension point for consuming hub events. It is a
//! routing decision, not a delivery callback: the hub invokes
//! [`Subscriber::accept`] at most once per distinct source per
//! subscription, and the installed [`Outlet`](crate::Outlet) (if any)
//! then receives every event from that source.
//!
//! ## Contract
//! - `accept` runs on whichever thread first publishes from a new source;
//!   it must not block unboundedly, and it must not publish back into the
//!   same hub (the per-source cache is mid-update).
//! - The [`Registrar`] is consumed by `register`, so an outlet can be
//!   installed at most once; dropping the registrar without registering
//!   caches the decision to discard that source's events.
//! - Returning `Err` cancels this subscription.
//!
//! ## Example
//! ```rust
//! use fanhub::{Hub, Name, Subscriber, Registrar, DeliveryResult};
//!
//! struct CpuOnly;
//!
//! impl Subscriber<u64> for CpuOnly {
//!     fn accept(&self, source: &Name, registrar: Registrar<'_, u64>) -> DeliveryResult {
//!         if source.segment() == "cpu" {
//!             registrar.register_fn(|event| {
//!                 println!("cpu reading: {}", event.payload());
//!                 Ok(())
//!             });
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let hub: Hub<u64> = Hub::new();
//! let _sub = hub.subscribe(CpuOnly);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::DeliveryResult;
use crate::events::{Event, Outlet, OutletFn};
use crate::names::Name;

/// Decides, once per source, how one subscription handles that source.
pub trait Subscriber<E: 'static>: Send + Sync {
    /// Invoked on first contact with `source`.
    ///
    /// Call `registrar.register(outlet)` to receive that source's events,
    /// or drop the registrar to discard them permanently. An `Err` return
    /// cancels this subscription.
    fn accept(&self, source: &Name, registrar: Registrar<'_, E>) -> DeliveryResult;
}

/// Shared subscribers delegate, so one value can back several
/// subscriptions.
impl<E: 'static, S> Subscriber<E> for Arc<S>
where
    S: Subscriber<E> + ?Sized,
{
    fn accept(&self, source: &Name, registrar: Registrar<'_, E>) -> DeliveryResult {
        (**self).accept(source, registrar)
    }
}

/// One-shot capability for installing an [`Outlet`] for a newly-seen
/// source.
///
/// `register` consumes the registrar, so a second installation attempt is
/// a compile error rather than a runtime contract.
pub struct Registrar<'a, E: 'static> {
    slot: &'a mut Option<Arc<dyn Outlet<E>>>,
}

impl<'a, E: 'static> Registrar<'a, E> {
    pub(crate) fn new(slot: &'a mut Option<Arc<dyn Outlet<E>>>) -> Self {
        Self { slot }
    }

    /// Installs `outlet` as the sink for this source.
    ///
    /// The outlet is cached for the life of the subscription and receives
    /// every later event from the source being registered.
    pub fn register(self, outlet: impl Outlet<E> + 'static) {
        *self.slot = Some(Arc::new(outlet));
    }

    /// Installs a closure as the sink for this source.
    ///
    /// Shorthand for `register(OutletFn::new(f))`.
    pub fn register_fn<F>(self, f: F)
    where
        F: Fn(&Event<E>) -> DeliveryResult + Send + Sync + 'static,
    {
        self.register(OutletFn::new(f));
    }
}

/// Function-backed subscriber.
///
/// Wraps a closure `Fn(&Name, Registrar) -> DeliveryResult`. Usually
/// reached through [`Hub::subscribe_fn`](crate::Hub::subscribe_fn);
/// construct one directly to share a single subscriber value across hubs.
pub struct SubscriberFn<E, F> {
    f: F,
    _payload: PhantomData<fn(E)>,
}

impl<E: 'static, F> SubscriberFn<E, F>
where
    F: Fn(&Name, Registrar<'_, E>) -> DeliveryResult + Send + Sync,
{
    /// Creates a function-backed subscriber.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _payload: PhantomData,
        }
    }
}

impl<E: 'static, F> Subscriber<E> for SubscriberFn<E, F>
where
    F: Fn(&Name, Registrar<'_, E>) -> DeliveryResult + Send + Sync,
{
    fn accept(&self, source: &Name, registrar: Registrar<'_, E>) -> DeliveryResult {
        (self.f)(source, registrar)
    }
}

//! # Delivery sink capability (`Outlet`).
//!
//! An outlet receives every event one subscriber gets from one source.
//! Outlets are installed through a [`Registrar`](crate::Registrar) the
//! first time a membership sees a source, then cached for its lifetime.
//!
//! ## Contract
//! - `accept` runs synchronously on the publishing thread. Unbounded
//!   blocking work stalls that publisher; keep delivery short.
//! - Returning `Err` cancels the owning subscription; the publisher never
//!   sees the error (it is reported on the diagnostic log).
//! - Panics are caught at the same boundary and treated the same way.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::DeliveryResult;
use crate::events::event::Event;

/// A sink accepting events from one source on behalf of one subscriber.
pub trait Outlet<E>: Send + Sync {
    /// Handles one event.
    ///
    /// An `Err` return cancels the owning subscription.
    fn accept(&self, event: &Event<E>) -> DeliveryResult;
}

/// Shared outlets delegate, so one sink can serve several sources.
impl<E, O> Outlet<E> for Arc<O>
where
    O: Outlet<E> + ?Sized,
{
    fn accept(&self, event: &Event<E>) -> DeliveryResult {
        (**self).accept(event)
    }
}

/// Function-backed outlet.
///
/// Wraps a closure so plain functions can act as sinks. Typically
/// installed via [`Registrar::register_fn`](crate::Registrar::register_fn);
/// construct one directly when the same sink is shared across sources:
///
/// ```rust
/// use std::sync::Arc;
/// use fanhub::{Hub, OutletFn};
///
/// let hub: Hub<i64> = Hub::new();
/// let tally = Arc::new(OutletFn::new(|event: &fanhub::Event<i64>| {
///     println!("{} -> {}", event.source(), event.payload());
///     Ok(())
/// }));
///
/// let _sub = hub.subscribe_fn(move |_source, registrar| {
///     registrar.register(Arc::clone(&tally));
///     Ok(())
/// });
/// ```
pub struct OutletFn<E, F> {
    f: F,
    _payload: PhantomData<fn(E)>,
}

impl<E, F> OutletFn<E, F>
where
    F: Fn(&Event<E>) -> DeliveryResult + Send + Sync,
{
    /// Creates a function-backed outlet.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _payload: PhantomData,
        }
    }
}

impl<E, F> Outlet<E> for OutletFn<E, F>
where
    F: Fn(&Event<E>) -> DeliveryResult + Send + Sync,
{
    fn accept(&self, event: &Event<E>) -> DeliveryResult {
        (self.f)(event)
    }
}

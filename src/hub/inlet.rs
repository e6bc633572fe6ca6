//! # Bound publish handle (`Inlet`).
//!
//! An inlet fixes the source identity once so producers publish without
//! carrying a name around. It is an immutable `(hub, source)` pair:
//! stateless, cheap to clone, safe to share among every producer of the
//! same source.

use crate::hub::core::Hub;
use crate::names::Name;

/// Publish handle bound to one source.
///
/// ## Example
/// ```rust
/// use fanhub::{Hub, Name};
///
/// let hub: Hub<u64> = Hub::new();
/// let ticks = hub.inlet(Name::parse("clock.ticks")?);
///
/// ticks.emit(1);
/// ticks.emit_with(|| expensive_reading());
///
/// fn expensive_reading() -> u64 { 2 }
/// # Ok::<(), fanhub::NameError>(())
/// ```
#[derive(Debug)]
pub struct Inlet<E: 'static> {
    hub: Hub<E>,
    source: Name,
}

impl<E: 'static> Inlet<E> {
    pub(crate) fn new(hub: Hub<E>, source: Name) -> Self {
        Self { hub, source }
    }

    /// Returns the source this inlet is bound to.
    #[inline]
    pub fn source(&self) -> &Name {
        &self.source
    }

    /// Publishes an already-computed payload from the bound source.
    ///
    /// Synchronous, in-line fan-out on the calling thread; no buffering
    /// or queueing.
    pub fn emit(&self, value: E) {
        self.hub.publish(&self.source, value);
    }

    /// Publishes a lazily-produced payload from the bound source.
    ///
    /// The supplier runs at most once per call and never without a live
    /// subscriber. See [`Hub::publish_with`].
    pub fn emit_with<F>(&self, supply: F)
    where
        F: FnOnce() -> E,
    {
        self.hub.publish_with(&self.source, supply);
    }
}

impl<E: 'static> Clone for Inlet<E> {
    fn clone(&self) -> Self {
        Self {
            hub: self.hub.clone(),
            source: self.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_inlet_forwards_to_hub() {
        let hub: Hub<i64> = Hub::new();
        let source = Name::parse("inlet.forward").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe_fn(move |_source, registrar| {
            let sink = Arc::clone(&sink);
            registrar.register_fn(move |event| {
                sink.lock()
                    .unwrap()
                    .push((event.source().clone(), *event.payload()));
                Ok(())
            });
            Ok(())
        });

        let inlet = hub.inlet(source.clone());
        inlet.emit(1);
        inlet.clone().emit_with(|| 2);

        assert_eq!(
            *seen.lock().unwrap(),
            [(source.clone(), 1), (source.clone(), 2)]
        );
        assert_eq!(inlet.source(), &source);
    }
}

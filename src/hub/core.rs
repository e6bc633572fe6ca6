//! # The dispatch root (`Hub`).
//!
//! A hub owns the head of the subscriber list and drives dispatch. The
//! head is a single atomically-swapped reference; subscribing prepends
//! with an optimistic compare-and-swap loop, and dispatch passes splice
//! tombstoned entries out while they deliver, so cleanup is amortized
//! into publishing.
//!
//! ## Guarantees
//! - **Fan-out**: every live subscription present when a dispatch starts
//!   receives the same `Event` instance exactly once, in list order
//!   (most recently subscribed first).
//! - **Lazy payloads**: a supplier passed to [`Hub::publish_with`] runs
//!   at most once per publish, and not at all without a live subscriber.
//! - **Self-pruning**: a cancelled subscription is unlinked by the next
//!   dispatch pass that walks over it.
//! - **Isolation**: one failing subscriber neither reaches the publisher
//!   nor stops delivery to the others.
//!
//! Dispatch is synchronous on the publishing thread; a slow outlet
//! stalls its publisher. Subscribers must not publish back into the hub
//! from inside their registration callback.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::env::Environment;
use crate::error::DeliveryResult;
use crate::events::Event;
use crate::hub::entry::Entry;
use crate::hub::inlet::Inlet;
use crate::hub::membership::Membership;
use crate::names::Name;
use crate::subscribers::{Registrar, Subscriber, SubscriberFn, Subscription};

/// Concurrent publish/subscribe dispatch root for one event type.
///
/// Cheap to clone; clones share the same subscriber list.
///
/// ## Example
/// ```rust
/// use fanhub::{Hub, Name};
/// use std::sync::{Arc, Mutex};
///
/// let hub: Hub<i64> = Hub::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// let _sub = hub.subscribe_fn(move |_source, registrar| {
///     let sink = Arc::clone(&sink);
///     registrar.register_fn(move |event| {
///         sink.lock().unwrap().push(*event.payload());
///         Ok(())
///     });
///     Ok(())
/// });
///
/// hub.inlet(Name::parse("demo.counter")?).emit(41);
/// assert_eq!(*seen.lock().unwrap(), [41]);
/// # Ok::<(), fanhub::NameError>(())
/// ```
pub struct Hub<E: 'static> {
    core: Arc<Core<E>>,
}

struct Core<E: 'static> {
    head: ArcSwapOption<Entry<E>>,
    environment: Environment,
}

impl<E: 'static> Hub<E> {
    /// Creates a hub with an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(Environment::empty())
    }

    /// Creates a hub carrying `environment`.
    ///
    /// The hub never interprets the environment; it is held for
    /// subscribers and embedding code to read back.
    #[must_use]
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            core: Arc::new(Core {
                head: ArcSwapOption::new(None),
                environment,
            }),
        }
    }

    /// Returns the environment this hub was constructed with.
    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.core.environment
    }

    /// Registers `subscriber` and returns its cancellation handle.
    ///
    /// The new subscription is prepended, so it is first in delivery
    /// order. Subscribing never fails and never blocks; contention with
    /// other subscribers or an in-flight dispatch is resolved by an
    /// optimistic retry on the head slot.
    pub fn subscribe(&self, subscriber: impl Subscriber<E> + 'static) -> Subscription<E> {
        let membership = Arc::new(Membership::new(Box::new(subscriber)));

        loop {
            let head = self.core.head.load_full();

            // Dead leading entries are elided here, shrinking the list
            // without waiting for the next dispatch pass.
            let entry = Arc::new(Entry::new(
                Arc::clone(&membership),
                Entry::scan(head.clone()),
            ));

            let witnessed = self
                .core
                .head
                .compare_and_swap(&head, Some(Arc::clone(&entry)));

            if same_node(&witnessed, &head) {
                return Subscription::new(entry);
            }
        }
    }

    /// Registers a closure-backed subscriber.
    ///
    /// Shorthand for `subscribe(SubscriberFn::new(f))`.
    pub fn subscribe_fn<F>(&self, f: F) -> Subscription<E>
    where
        F: Fn(&Name, Registrar<'_, E>) -> DeliveryResult + Send + Sync + 'static,
    {
        self.subscribe(SubscriberFn::new(f))
    }

    /// Publishes an already-computed payload from `source`.
    pub fn publish(&self, source: &Name, value: E) {
        self.dispatch(source, move || value);
    }

    /// Publishes a lazily-produced payload from `source`.
    ///
    /// `supply` runs at most once, on this thread, and only if a live
    /// subscription exists when dispatch reaches its first delivery; a
    /// panic inside it propagates to the caller.
    pub fn publish_with<F>(&self, source: &Name, supply: F)
    where
        F: FnOnce() -> E,
    {
        self.dispatch(source, supply);
    }

    /// Binds a publish handle to `source`.
    #[must_use]
    pub fn inlet(&self, source: Name) -> Inlet<E> {
        Inlet::new(self.clone(), source)
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.core.head.load_full();

        while let Some(entry) = cursor {
            if entry.is_live() {
                count += 1;
            }
            cursor = entry.next();
        }

        count
    }

    /// Returns `true` when no live subscription exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical list length, tombstones included.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.core.head.load_full();

        while let Some(entry) = cursor {
            count += 1;
            cursor = entry.next();
        }

        count
    }

    /// One pass over the list: deliver to every live entry, splice out
    /// every dead run encountered on the way.
    fn dispatch<F>(&self, source: &Name, supply: F)
    where
        F: FnOnce() -> E,
    {
        let Some(head) = self.core.head.load_full() else {
            return;
        };

        let mut emission = Emission::new(source.clone(), supply);
        let mut previous: Option<Arc<Entry<E>>> = None;
        let mut current = Arc::clone(&head);

        loop {
            let nearest = Entry::scan(Some(Arc::clone(&current)));

            match nearest {
                Some(live) if Arc::ptr_eq(&live, &current) => {}
                Some(live) => {
                    self.unlink(previous.as_ref(), Some(Arc::clone(&live)), &head);
                    current = live;
                }
                None => {
                    self.unlink(previous.as_ref(), None, &head);
                    return;
                }
            }

            current.accept(emission.event());

            previous = Some(Arc::clone(&current));
            match current.next() {
                Some(following) => current = following,
                None => return,
            }
        }
    }

    /// Splices a dead run out of the list.
    ///
    /// With no live predecessor the splice is a head compare-and-swap
    /// against the dispatch's original snapshot. A failed swap means a
    /// racing subscribe moved the head; the new head still chains
    /// through `next`, so the pass continues without retrying.
    fn unlink(
        &self,
        previous: Option<&Arc<Entry<E>>>,
        next: Option<Arc<Entry<E>>>,
        head: &Arc<Entry<E>>,
    ) {
        match previous {
            Some(entry) => entry.relink(next),
            None => {
                let snapshot = Some(Arc::clone(head));
                let _ = self.core.head.compare_and_swap(&snapshot, next);
            }
        }
    }
}

impl<E: 'static> Clone for Hub<E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<E: 'static> Default for Hub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> std::fmt::Debug for Hub<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub").field("live", &self.len()).finish()
    }
}

/// Pointer identity over optional list nodes.
fn same_node<E: 'static>(a: &Option<Arc<Entry<E>>>, b: &Option<Arc<Entry<E>>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// The at-most-once event of one dispatch pass.
///
/// Holds the payload producer until the first live delivery forces it;
/// a pass that finds no live entry never constructs the event.
struct Emission<E, F>
where
    F: FnOnce() -> E,
{
    source: Name,
    supply: Option<F>,
    event: Option<Event<E>>,
}

impl<E, F> Emission<E, F>
where
    F: FnOnce() -> E,
{
    fn new(source: Name, supply: F) -> Self {
        Self {
            source,
            supply: Some(supply),
            event: None,
        }
    }

    fn event(&mut self) -> &Event<E> {
        if let Some(produce) = self.supply.take() {
            self.event = Some(Event::new(self.source.clone(), produce()));
        }

        match &self.event {
            Some(event) => event,
            // The supplier is taken only on the line that stores the event.
            None => unreachable!("emission forced without a supplier"),
        }
    }
}

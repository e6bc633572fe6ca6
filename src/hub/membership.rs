//! # Per-source fan-out state (`Membership`).
//!
//! One membership holds everything a live subscription has accumulated:
//! the subscriber itself and one cached routing decision per distinct
//! source it has seen. The cache grows monotonically and is never
//! evicted; it dies with the membership.
//!
//! ## First contact
//! The first event from a given source resolves that source's outlet by
//! invoking the subscriber's registration callback exactly once, under
//! the cache's entry guard, even when several publishing threads race on
//! the same fresh source. Registering nothing caches `None`, which
//! permanently discards that source's events for this subscription.

use std::sync::Arc;

use dashmap::mapref::entry::Entry as CacheEntry;
use dashmap::DashMap;

use crate::error::DeliveryResult;
use crate::events::{Event, Outlet};
use crate::names::Name;
use crate::subscribers::{Registrar, Subscriber};

/// One subscriber's live state: the per-source outlet cache.
pub(crate) struct Membership<E: 'static> {
    outlets: DashMap<Name, Option<Arc<dyn Outlet<E>>>>,
    delegate: Box<dyn Subscriber<E>>,
}

impl<E: 'static> Membership<E> {
    pub(crate) fn new(delegate: Box<dyn Subscriber<E>>) -> Self {
        Self {
            outlets: DashMap::new(),
            delegate,
        }
    }

    /// Routes `event` through the outlet cached for its source,
    /// resolving the outlet on first contact.
    ///
    /// An `Err` from registration or delivery propagates to the entry
    /// boundary, where it cancels this subscription.
    pub(crate) fn accept(&self, event: &Event<E>) -> DeliveryResult {
        let source = event.source();

        let outlet = match self.outlets.entry(source.clone()) {
            CacheEntry::Occupied(cached) => cached.get().clone(),
            CacheEntry::Vacant(vacant) => {
                // Registration runs under the entry guard, so concurrent
                // first-touch from several publishers resolves once.
                let mut slot = None;
                self.delegate.accept(source, Registrar::new(&mut slot))?;
                vacant.insert(slot.clone());
                slot
            }
        };

        match outlet {
            Some(outlet) => outlet.accept(event),
            None => Ok(()),
        }
    }
}

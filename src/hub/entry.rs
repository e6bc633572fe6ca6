//! # Subscriber-list node (`Entry`).
//!
//! Each subscription is one entry in the hub's singly linked list. An
//! entry with no membership is a tombstone: logically dead, still linked
//! until a dispatch pass splices it out.
//!
//! The membership slot is also the fault-isolation boundary: a delivery
//! failure or panic tombstones this entry only, and the publisher and the
//! other subscribers never observe it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::warn;

use crate::error::HubError;
use crate::events::Event;
use crate::hub::membership::Membership;

/// One node of the subscriber list.
///
/// `membership == None` marks a tombstone. `next` is reassigned only when
/// a dispatch pass splices dead successors out.
pub(crate) struct Entry<E: 'static> {
    membership: ArcSwapOption<Membership<E>>,
    next: ArcSwapOption<Entry<E>>,
}

impl<E: 'static> Entry<E> {
    pub(crate) fn new(membership: Arc<Membership<E>>, next: Option<Arc<Entry<E>>>) -> Self {
        Self {
            membership: ArcSwapOption::new(Some(membership)),
            next: ArcSwapOption::new(next),
        }
    }

    /// Returns the nearest live entry at or after `from`.
    ///
    /// The compact-head walk: used to elide dead leading entries at
    /// subscribe time and to drive dispatch-time pruning.
    pub(crate) fn scan(from: Option<Arc<Entry<E>>>) -> Option<Arc<Entry<E>>> {
        let mut candidate = from;

        while let Some(entry) = candidate {
            if entry.is_live() {
                return Some(entry);
            }
            candidate = entry.next();
        }

        None
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.membership.load().is_some()
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<Arc<Entry<E>>> {
        self.next.load_full()
    }

    /// Splices `next` in as this entry's successor.
    pub(crate) fn relink(&self, next: Option<Arc<Entry<E>>>) {
        self.next.store(next);
    }

    /// Delivers `event` to this entry's membership, if it is still live.
    ///
    /// Failures and panics in subscriber code are absorbed here: the
    /// entry tombstones itself and the dispatch pass moves on.
    pub(crate) fn accept(&self, event: &Event<E>) {
        let Some(membership) = self.membership.load_full() else {
            return;
        };

        match panic::catch_unwind(AssertUnwindSafe(|| membership.accept(event))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                warn!(
                    source = %event.source(),
                    error = %error,
                    "subscriber failed; cancelling its subscription"
                );
                self.retire();
            }
            Err(panic) => {
                warn!(
                    source = %event.source(),
                    panic = panic_reason(&panic),
                    "subscriber panicked; cancelling its subscription"
                );
                self.retire();
            }
        }
    }

    /// Internal self-cancellation: tombstone without the double-cancel
    /// check. Racing a concurrent cancel here is benign.
    fn retire(&self) {
        self.membership.store(None);
    }

    /// Caller-initiated cancellation.
    ///
    /// One atomic swap: whoever takes the membership out wins, and a
    /// caller finding the slot already empty gets the error. This keeps
    /// internal self-cancel benign while a second caller-initiated cancel
    /// stays a reported bug.
    pub(crate) fn cancel(&self) -> Result<(), HubError> {
        match self.membership.swap(None) {
            Some(_) => Ok(()),
            None => Err(HubError::AlreadyCancelled),
        }
    }
}

impl<E: 'static> fmt::Debug for Entry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Best-effort text for a panic payload, for the diagnostic log.
fn panic_reason(panic: &(dyn Any + Send)) -> &str {
    if let Some(text) = panic.downcast_ref::<&str>() {
        text
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text
    } else {
        "non-string panic payload"
    }
}

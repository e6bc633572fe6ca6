//! # Cancellation handle (`Subscription`).
//!
//! Returned by [`Hub::subscribe`](crate::Hub::subscribe). Holds the
//! subscription's list entry and cancels it on request.
//!
//! ## Cancellation semantics
//! - `cancel` tombstones the entry immediately; the hub physically
//!   unlinks it during a later dispatch pass.
//! - A dispatch already in flight may still deliver one event to a
//!   just-cancelled subscription; that race is permitted.
//! - Cancelling twice is a caller bug and reports
//!   [`HubError::AlreadyCancelled`], as does cancelling a subscription
//!   the hub already cancelled after a delivery failure.

use std::fmt;
use std::sync::Arc;

use crate::error::HubError;
use crate::hub::entry::Entry;

/// Handle for cancelling one subscription.
///
/// Dropping the handle does *not* cancel: a subscription outlives its
/// handle and keeps receiving events until cancelled or failed.
pub struct Subscription<E: 'static> {
    entry: Arc<Entry<E>>,
}

impl<E: 'static> Subscription<E> {
    pub(crate) fn new(entry: Arc<Entry<E>>) -> Self {
        Self { entry }
    }

    /// Cancels this subscription.
    ///
    /// The entry is tombstoned at once and unlinked by a later dispatch
    /// pass; no further sources are registered and, dispatch races aside,
    /// no further events are delivered.
    ///
    /// # Errors
    /// [`HubError::AlreadyCancelled`] if the subscription was cancelled
    /// before, by this handle or by the hub itself.
    pub fn cancel(&self) -> Result<(), HubError> {
        self.entry.cancel()
    }

    /// Returns `true` once the subscription is cancelled, whether by the
    /// caller or by the hub after a delivery failure.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        !self.entry.is_live()
    }
}

impl<E: 'static> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

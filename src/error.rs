//! Error types used by the hub and its collaborators.
//!
//! This module defines two error enums and one alias:
//!
//! - [`HubError`]: caller-facing programmer errors raised by hub handles.
//! - [`NameError`]: errors raised while parsing name paths.
//! - [`DeliveryError`] / [`DeliveryResult`]: the outcome type returned by
//!   subscriber code; an `Err` is interpreted by the hub as an implicit
//!   cancellation of that one subscription, never as a publisher failure.
//!
//! The enums provide `as_label` helpers returning short stable labels for
//! logs and metrics.

use thiserror::Error;

/// Boxed error returned by subscriber registration and delivery code.
///
/// Anything a subscriber can fail with fits here; the hub does not inspect
/// it beyond logging. See [`DeliveryResult`].
pub type DeliveryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of one registration or delivery call.
///
/// Returning `Err` cancels the failing subscription on the spot (the entry
/// is tombstoned and pruned by a later dispatch pass). The publisher never
/// observes the error.
pub type DeliveryResult = Result<(), DeliveryError>;

/// # Errors raised by hub handles.
///
/// These represent misuse of the subscription surface, not delivery
/// failures: delivery failures travel through [`DeliveryResult`] and are
/// absorbed at the entry boundary.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HubError {
    /// The subscription was already cancelled, either by a prior call to
    /// `cancel` or by the hub itself after a delivery failure.
    ///
    /// Cancelling twice is a caller bug, not a benign no-op.
    #[error("subscription already cancelled")]
    AlreadyCancelled,
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanhub::HubError;
    ///
    /// let err = HubError::AlreadyCancelled;
    /// assert_eq!(err.as_label(), "hub_already_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::AlreadyCancelled => "hub_already_cancelled",
        }
    }
}

/// # Errors raised while parsing name paths.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NameError {
    /// The path contains no usable segments (empty, or dots only).
    #[error("invalid name path: {path:?}")]
    InvalidPath {
        /// The rejected input.
        path: String,
    },
}

impl NameError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            NameError::InvalidPath { .. } => "name_invalid_path",
        }
    }
}

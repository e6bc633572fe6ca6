//! # Subscriber extension points.
//!
//! [`Subscriber`] is the contract for plugging consumers into a
//! [`Hub`](crate::Hub). A subscriber is not handed events directly:
//! the first time a membership sees a given source it asks the subscriber,
//! once, what to do with that source, via a one-shot [`Registrar`].
//! Registering an outlet routes every later event from that source to it;
//! declining (dropping the registrar) permanently discards them.
//!
//! Subscribing yields a [`Subscription`] handle used to cancel.

mod subscriber;
mod subscription;

pub use subscriber::{Registrar, Subscriber, SubscriberFn};
pub use subscription::Subscription;

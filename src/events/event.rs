//! # One immutable delivery unit (`Event`).
//!
//! An [`Event`] is constructed at most once per publish call and shared by
//! reference across every delivery in that call: all live subscribers of a
//! dispatch observe the same instance.

use crate::names::Name;

/// An immutable payload tagged with the source that emitted it.
///
/// ## Example
/// ```rust
/// use fanhub::{Event, Name};
///
/// let source = Name::parse("sensor.temp")?;
/// let event = Event::new(source.clone(), 21);
///
/// assert_eq!(event.source(), &source);
/// assert_eq!(*event.payload(), 21);
///
/// let fahrenheit = event.map(|celsius| celsius * 9 / 5 + 32);
/// assert_eq!(*fahrenheit.payload(), 69);
/// assert_eq!(fahrenheit.source(), &source);
/// # Ok::<(), fanhub::NameError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Event<E> {
    source: Name,
    payload: E,
}

impl<E> Event<E> {
    /// Creates an event emitted by `source`.
    pub fn new(source: Name, payload: E) -> Self {
        Self { source, payload }
    }

    /// Returns the source that emitted this event.
    #[inline]
    pub fn source(&self) -> &Name {
        &self.source
    }

    /// Returns the payload.
    #[inline]
    pub fn payload(&self) -> &E {
        &self.payload
    }

    /// Consumes the event, returning its payload.
    pub fn into_payload(self) -> E {
        self.payload
    }

    /// Produces a new event with the same source and a transformed payload.
    pub fn map<R>(&self, transform: impl FnOnce(&E) -> R) -> Event<R> {
        Event {
            source: self.source.clone(),
            payload: transform(&self.payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_source() {
        let source = Name::parse("event.mapped").unwrap();
        let event = Event::new(source.clone(), 10);

        let doubled = event.map(|n| n * 2);

        assert_eq!(doubled.source(), &source);
        assert_eq!(*doubled.payload(), 20);
        // The source event is untouched.
        assert_eq!(*event.payload(), 10);
    }

    #[test]
    fn test_map_can_change_payload_type() {
        let source = Name::parse("event.retype").unwrap();
        let event = Event::new(source, 404);

        let text = event.map(|code| format!("status {code}"));
        assert_eq!(text.payload(), "status 404");
    }
}

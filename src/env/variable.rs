//! # Typed configuration accessors (`Variable`).
//!
//! A [`Variable`] pairs a [`Name`] with a typed fallback. Resolving it
//! against an [`Environment`] decodes the stored [`Value`]:
//!
//! - a value of the native type is returned as-is;
//! - integers widen to floats;
//! - strings are parsed (`"true"`, `"42"`, `"0.5"`, dotted name paths);
//! - anything else, or a miss, yields the fallback.
//!
//! Decoding never fails: a variable always produces a usable value.

use std::sync::Arc;

use crate::env::environment::Environment;
use crate::env::value::Value;
use crate::names::Name;

/// Decodes a typed reading out of one [`Value`].
///
/// Implemented for the primitive types an [`Environment`] can carry.
pub trait FromValue: Sized {
    /// Attempts the decode; `None` means "wrong shape, use the fallback".
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(*flag),
            Value::Str(text) => text.parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(number) => Some(*number),
            Value::Str(text) => text.parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(number) => Some(*number),
            // Integers widen; the reverse narrows and is rejected.
            Value::Int(number) => Some(*number as f64),
            Value::Str(text) => text.parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(text) => Some(text.to_string()),
            _ => None,
        }
    }
}

impl FromValue for Arc<str> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(text) => Some(Arc::clone(text)),
            _ => None,
        }
    }
}

impl FromValue for Name {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Name(name) => Some(name.clone()),
            Value::Str(text) => Name::parse(text).ok(),
            _ => None,
        }
    }
}

/// A named, typed configuration reading with a fallback.
///
/// ## Example
/// ```rust
/// use fanhub::{Environment, Name, Variable};
///
/// let key = Name::parse("hub.window")?;
/// let window = Variable::new(key.clone(), 16i64);
///
/// assert_eq!(window.resolve(&Environment::single(key, 64)), 64);
/// assert_eq!(window.resolve(&Environment::empty()), 16);
/// # Ok::<(), fanhub::NameError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Variable<T> {
    name: Name,
    fallback: T,
}

impl<T> Variable<T>
where
    T: FromValue + Clone,
{
    /// Creates a variable reading `name`, yielding `fallback` on a miss or
    /// a value of the wrong shape.
    pub fn new(name: Name, fallback: T) -> Self {
        Self { name, fallback }
    }

    /// Returns the name this variable reads.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Resolves this variable against `environment`.
    pub fn resolve(&self, environment: &Environment) -> T {
        environment
            .get(&self.name)
            .and_then(|value| T::from_value(&value))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> Name {
        Name::parse(path).unwrap()
    }

    fn env_with(key: &Name, value: impl Into<Value>) -> Environment {
        Environment::single(key.clone(), value)
    }

    #[test]
    fn test_native_types_pass_through() {
        let key = name("var.native");

        assert!(Variable::new(key.clone(), false).resolve(&env_with(&key, true)));
        assert_eq!(Variable::new(key.clone(), 0i64).resolve(&env_with(&key, 42)), 42);
        assert_eq!(
            Variable::new(key.clone(), 0.0f64).resolve(&env_with(&key, 2.5)),
            2.5
        );
        assert_eq!(
            Variable::new(key.clone(), String::new()).resolve(&env_with(&key, "text")),
            "text"
        );
    }

    #[test]
    fn test_strings_decode() {
        let key = name("var.decoded");

        assert!(Variable::new(key.clone(), false).resolve(&env_with(&key, "true")));
        assert_eq!(Variable::new(key.clone(), 0i64).resolve(&env_with(&key, "42")), 42);
        assert_eq!(
            Variable::new(key.clone(), 0.0f64).resolve(&env_with(&key, "0.5")),
            0.5
        );

        let decoded: Name = Variable::new(key.clone(), name("var.fallback"))
            .resolve(&env_with(&key, "metrics.cpu"));
        assert_eq!(decoded, name("metrics.cpu"));
    }

    #[test]
    fn test_int_widens_to_float() {
        let key = name("var.widened");
        assert_eq!(Variable::new(key.clone(), 0.0f64).resolve(&env_with(&key, 3)), 3.0);
    }

    #[test]
    fn test_mismatch_yields_fallback() {
        let key = name("var.mismatch");

        // A float does not narrow to an integer.
        assert_eq!(Variable::new(key.clone(), 7i64).resolve(&env_with(&key, 2.5)), 7);
        // A number is not a string.
        assert_eq!(
            Variable::new(key.clone(), String::from("default")).resolve(&env_with(&key, 42)),
            "default"
        );
        // Unparseable text falls back.
        assert_eq!(
            Variable::new(key.clone(), 7i64).resolve(&env_with(&key, "not-a-number")),
            7
        );
    }

    #[test]
    fn test_miss_yields_fallback() {
        let key = name("var.missing");
        assert_eq!(Variable::new(key, 11i64).resolve(&Environment::empty()), 11);
    }
}

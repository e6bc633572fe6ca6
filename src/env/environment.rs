//! # Chained, overridable configuration lookup (`Environment`).
//!
//! An [`Environment`] maps [`Name`]s to [`Value`]s. It is immutable:
//! every combinator returns a new environment layered over the receiver,
//! so a hub's construction-time configuration can be shared freely.
//!
//! ## Precedence
//! `env.with(..)` and `env.override_with(primary)` consult the newest
//! layer first and fall back to the receiver. `memorize()` caches both
//! hits and misses, for lookups that are expensive to recompute.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::env::value::Value;
use crate::names::Name;

/// A single resolution step from [`Name`] to [`Value`].
///
/// Implemented by the combinator layers in this module; embedding code
/// usually supplies one via [`Environment::from_fn`].
pub trait Lookup: Send + Sync {
    /// Resolves `name`, or reports a miss.
    fn get(&self, name: &Name) -> Option<Value>;
}

/// An immutable, composable configuration lookup.
///
/// Cheap to clone (one `Arc`). A [`Hub`](crate::Hub) carries one of these
/// from construction and passes it through unchanged.
#[derive(Clone)]
pub struct Environment {
    lookup: Arc<dyn Lookup>,
}

impl Environment {
    /// Returns the environment that resolves nothing.
    pub fn empty() -> Environment {
        Environment {
            lookup: Arc::new(Empty),
        }
    }

    /// Returns an environment holding exactly one binding.
    pub fn single(name: Name, value: impl Into<Value>) -> Environment {
        Environment {
            lookup: Arc::new(Single {
                name,
                value: value.into(),
            }),
        }
    }

    /// Adapts a lookup function into an environment.
    pub fn from_fn<F>(f: F) -> Environment
    where
        F: Fn(&Name) -> Option<Value> + Send + Sync + 'static,
    {
        Environment {
            lookup: Arc::new(FnLookup { f }),
        }
    }

    /// Resolves `name` against this environment.
    pub fn get(&self, name: &Name) -> Option<Value> {
        self.lookup.get(name)
    }

    /// Resolves `name`, falling back to `value` on a miss.
    pub fn get_or(&self, name: &Name, value: impl Into<Value>) -> Value {
        self.get(name).unwrap_or_else(|| value.into())
    }

    /// Layers one binding over this environment.
    ///
    /// The new binding is consulted first; everything else falls through.
    pub fn with(&self, name: Name, value: impl Into<Value>) -> Environment {
        self.override_with(Environment::single(name, value))
    }

    /// Layers `primary` over this environment.
    ///
    /// `primary` is consulted first; this environment is the fallback.
    pub fn override_with(&self, primary: Environment) -> Environment {
        Environment {
            lookup: Arc::new(Chained {
                primary,
                fallback: self.clone(),
            }),
        }
    }

    /// Caches resolutions, hits and misses alike.
    ///
    /// Useful in front of lookups that are expensive to recompute (system
    /// probes, parsed files). The cache grows with distinct names queried
    /// and is never evicted.
    pub fn memorize(&self) -> Environment {
        Environment {
            lookup: Arc::new(Memorized {
                delegate: self.clone(),
                cache: DashMap::new(),
            }),
        }
    }

    /// Masks bindings whose name fails `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Environment
    where
        P: Fn(&Name) -> bool + Send + Sync + 'static,
    {
        Environment {
            lookup: Arc::new(Filtered {
                delegate: self.clone(),
                predicate,
            }),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::empty()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Environment(..)")
    }
}

struct Empty;

impl Lookup for Empty {
    fn get(&self, _name: &Name) -> Option<Value> {
        None
    }
}

struct Single {
    name: Name,
    value: Value,
}

impl Lookup for Single {
    fn get(&self, name: &Name) -> Option<Value> {
        (*name == self.name).then(|| self.value.clone())
    }
}

struct FnLookup<F> {
    f: F,
}

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&Name) -> Option<Value> + Send + Sync,
{
    fn get(&self, name: &Name) -> Option<Value> {
        (self.f)(name)
    }
}

struct Chained {
    primary: Environment,
    fallback: Environment,
}

impl Lookup for Chained {
    fn get(&self, name: &Name) -> Option<Value> {
        self.primary.get(name).or_else(|| self.fallback.get(name))
    }
}

struct Memorized {
    delegate: Environment,
    // Misses are cached as None so a missing binding probes once.
    cache: DashMap<Name, Option<Value>>,
}

impl Lookup for Memorized {
    fn get(&self, name: &Name) -> Option<Value> {
        if let Some(cached) = self.cache.get(name) {
            return cached.value().clone();
        }

        self.cache
            .entry(name.clone())
            .or_insert_with(|| self.delegate.get(name))
            .value()
            .clone()
    }
}

struct Filtered<P> {
    delegate: Environment,
    predicate: P,
}

impl<P> Lookup for Filtered<P>
where
    P: Fn(&Name) -> bool + Send + Sync,
{
    fn get(&self, name: &Name) -> Option<Value> {
        if (self.predicate)(name) {
            self.delegate.get(name)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn name(path: &str) -> Name {
        Name::parse(path).unwrap()
    }

    #[test]
    fn test_empty_resolves_nothing() {
        let env = Environment::empty();
        assert_eq!(env.get(&name("env.anything")), None);
    }

    #[test]
    fn test_single_binding() {
        let key = name("env.single");
        let env = Environment::single(key.clone(), 7);

        assert_eq!(env.get(&key), Some(Value::Int(7)));
        assert_eq!(env.get(&name("env.other")), None);
    }

    #[test]
    fn test_with_layers_newest_first() {
        let key = name("env.layered");
        let env = Environment::single(key.clone(), 1).with(key.clone(), 2);

        assert_eq!(env.get(&key), Some(Value::Int(2)));
    }

    #[test]
    fn test_override_with_falls_back() {
        let primary_key = name("env.primary");
        let fallback_key = name("env.fallback");

        let env = Environment::single(fallback_key.clone(), "base")
            .override_with(Environment::single(primary_key.clone(), "top"));

        assert_eq!(env.get(&primary_key), Some(Value::from("top")));
        assert_eq!(env.get(&fallback_key), Some(Value::from("base")));
    }

    #[test]
    fn test_memorize_probes_once_per_name() {
        let probes = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&probes);

        let env = Environment::from_fn(move |queried| {
            counted.fetch_add(1, Ordering::SeqCst);
            (queried.segment() == "hit").then(|| Value::Int(1))
        })
        .memorize();

        let hit = name("env.memo.hit");
        let miss = name("env.memo.miss");

        for _ in 0..3 {
            assert_eq!(env.get(&hit), Some(Value::Int(1)));
            assert_eq!(env.get(&miss), None);
        }

        assert_eq!(probes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_filter_masks_bindings() {
        let kept = name("env.filter.kept");
        let masked = name("env.filter.masked");

        let env = Environment::single(kept.clone(), 1)
            .with(masked.clone(), 2)
            .filter(|queried| queried.segment() != "masked");

        assert_eq!(env.get(&kept), Some(Value::Int(1)));
        assert_eq!(env.get(&masked), None);
    }

    #[test]
    fn test_get_or_fallback() {
        let env = Environment::empty();
        assert_eq!(env.get_or(&name("env.missing"), 9), Value::Int(9));
    }
}

//! # Hierarchical interned identity (`Name`).
//!
//! [`Name`] is a dotted-path identity such as `service.orders.latency`.
//! Each path segment is one node in a process-wide tree; parsing the same
//! path twice yields the same shared node.
//!
//! ## Properties
//! - **Cheap to clone**: a `Name` is one `Arc` pointer.
//! - **Value equality, stable hash**: two names are equal iff their paths
//!   are equal; interning makes the common case a pointer comparison.
//! - **Map key**: implements `Eq + Hash` and is used as the hub's
//!   per-source cache key.
//!
//! Interned nodes are never evicted; names live for the process lifetime.
//!
//! ## Example
//! ```rust
//! use fanhub::Name;
//!
//! let cpu = Name::parse("metrics.cpu")?;
//! let load = cpu.name("load")?;
//!
//! assert_eq!(load.path(), "metrics.cpu.load");
//! assert_eq!(load.segment(), "load");
//! assert_eq!(load.parent(), Some(&cpu));
//! # Ok::<(), fanhub::NameError>(())
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::error::NameError;

const DOT: char = '.';

/// Root table shared by the whole process.
fn roots() -> &'static DashMap<Box<str>, Name> {
    static ROOTS: OnceLock<DashMap<Box<str>, Name>> = OnceLock::new();
    ROOTS.get_or_init(DashMap::new)
}

/// One node in the name tree.
struct Node {
    segment: Box<str>,
    parent: Option<Name>,
    children: DashMap<Box<str>, Name>,
    path: OnceLock<Box<str>>,
}

/// An interned, hierarchical, dotted-path identity.
///
/// Used as the source tag on every [`Event`](crate::Event) and as the key
/// of each subscriber's per-source outlet cache.
#[derive(Clone)]
pub struct Name {
    node: Arc<Node>,
}

impl Name {
    fn root(segment: &str) -> Name {
        intern(roots(), segment, None)
    }

    fn child(&self, segment: &str) -> Name {
        intern(&self.node.children, segment, Some(self.clone()))
    }

    /// Parses a dotted path into an interned name.
    ///
    /// Empty segments are elided (`"a..b"` is `"a.b"`); a path with no
    /// usable segments is rejected.
    ///
    /// # Errors
    /// [`NameError::InvalidPath`] when the path is empty or dots-only.
    pub fn parse(path: &str) -> Result<Name, NameError> {
        extend(None, path).ok_or_else(|| NameError::InvalidPath {
            path: path.to_string(),
        })
    }

    /// Resolves a dotted path relative to this name.
    ///
    /// `Name::parse("a")?.name("b.c")` is the same node as
    /// `Name::parse("a.b.c")`.
    ///
    /// # Errors
    /// [`NameError::InvalidPath`] when the path is empty or dots-only.
    pub fn name(&self, path: &str) -> Result<Name, NameError> {
        extend(Some(self.clone()), path).ok_or_else(|| NameError::InvalidPath {
            path: path.to_string(),
        })
    }

    /// Returns the leaf segment of this name.
    #[inline]
    pub fn segment(&self) -> &str {
        &self.node.segment
    }

    /// Returns the enclosing name, if any.
    #[inline]
    pub fn parent(&self) -> Option<&Name> {
        self.node.parent.as_ref()
    }

    /// Returns the fully-qualified dotted path.
    ///
    /// Computed once per node and cached.
    pub fn path(&self) -> &str {
        self.node.path.get_or_init(|| {
            let mut segments = Vec::with_capacity(self.depth());
            for name in self.ancestry() {
                segments.push(name.segment());
            }
            segments.reverse();
            segments.join(".").into_boxed_str()
        })
    }

    /// Returns the number of segments in this name.
    pub fn depth(&self) -> usize {
        self.ancestry().count()
    }

    /// Walks from this name up to its root, leaf first.
    pub fn ancestry(&self) -> Ancestry<'_> {
        Ancestry { next: Some(self) }
    }
}

/// Interns one segment under `parent` (or as a root when `parent` is None).
fn intern(table: &DashMap<Box<str>, Name>, segment: &str, parent: Option<Name>) -> Name {
    // Fast path: no key allocation on a hit.
    if let Some(existing) = table.get(segment) {
        return existing.value().clone();
    }

    table
        .entry(Box::from(segment))
        .or_insert_with(|| Name {
            node: Arc::new(Node {
                segment: Box::from(segment),
                parent,
                children: DashMap::new(),
                path: OnceLock::new(),
            }),
        })
        .value()
        .clone()
}

/// Folds the non-empty segments of `path` onto `base`.
///
/// A path contributing no segments resolves to nothing, even relative to
/// an existing name.
fn extend(base: Option<Name>, path: &str) -> Option<Name> {
    let mut current = base;
    let mut consumed = false;

    for segment in path.split(DOT).filter(|segment| !segment.is_empty()) {
        consumed = true;
        current = Some(match current {
            Some(name) => name.child(segment),
            None => Name::root(segment),
        });
    }

    if consumed {
        current
    } else {
        None
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) || self.path() == other.path()
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.path()).finish()
    }
}

impl std::str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::parse(s)
    }
}

/// Leaf-to-root iterator over a name's segments. See [`Name::ancestry`].
pub struct Ancestry<'a> {
    next: Option<&'a Name>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a Name;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_interns_one_node_per_path() {
        let a = Name::parse("intern.alpha.beta").unwrap();
        let b = Name::parse("intern.alpha.beta").unwrap();

        assert!(Arc::ptr_eq(&a.node, &b.node));
        assert_eq!(a, b);
    }

    #[test]
    fn test_relative_name_matches_absolute_parse() {
        let base = Name::parse("rel.base").unwrap();
        let child = base.name("x.y").unwrap();

        assert_eq!(child, Name::parse("rel.base.x.y").unwrap());
        assert_eq!(child.path(), "rel.base.x.y");
    }

    #[test]
    fn test_empty_segments_elided() {
        let name = Name::parse("elide..a...b").unwrap();
        assert_eq!(name.path(), "elide.a.b");
    }

    #[test]
    fn test_invalid_paths_rejected() {
        assert!(Name::parse("").is_err());
        assert!(Name::parse("...").is_err());

        let base = Name::parse("invalid.base").unwrap();
        assert!(base.name("").is_err());
        assert!(base.name("..").is_err());
    }

    #[test]
    fn test_parent_chain() {
        let name = Name::parse("chain.one.two").unwrap();

        assert_eq!(name.segment(), "two");
        assert_eq!(name.parent().unwrap().segment(), "one");
        assert_eq!(name.parent().unwrap().parent().unwrap().segment(), "chain");
        assert!(name.parent().unwrap().parent().unwrap().parent().is_none());
        assert_eq!(name.depth(), 3);
    }

    #[test]
    fn test_ancestry_is_leaf_first() {
        let name = Name::parse("walk.a.b").unwrap();
        let segments: Vec<&str> = name.ancestry().map(Name::segment).collect();
        assert_eq!(segments, ["b", "a", "walk"]);
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Name::parse("key.one").unwrap(), 1);
        map.insert(Name::parse("key.two").unwrap(), 2);

        assert_eq!(map.get(&Name::parse("key.one").unwrap()), Some(&1));
        assert_eq!(map.get(&Name::parse("key.two").unwrap()), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_display_is_path() {
        let name = Name::parse("disp.leaf").unwrap();
        assert_eq!(name.to_string(), "disp.leaf");
    }
}

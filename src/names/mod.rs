//! # Interned hierarchical names.
//!
//! Provides [`Name`], the identity value that tags every emitted event and
//! keys every per-source delivery channel.
//!
//! Names form a tree: `"metrics.cpu.load"` is the `load` node under
//! `metrics.cpu`. Every distinct path resolves to one shared, process-wide
//! node, so clones are a pointer copy and equality is usually a pointer
//! comparison.

mod name;

pub use name::{Ancestry, Name};

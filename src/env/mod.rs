//! # Construction-time configuration.
//!
//! A hub carries an opaque [`Environment`] supplied at construction and
//! never interprets it; subscribers and embedding code read it back through
//! typed [`Variable`] accessors.
//!
//! An environment is an immutable composition of lookups:
//!
//! ```rust
//! use fanhub::{Environment, Name, Variable};
//!
//! let window = Name::parse("aggregate.window")?;
//! let env = Environment::single(window.clone(), 32)
//!     .with(Name::parse("aggregate.enabled")?, true)
//!     .memorize();
//!
//! let variable = Variable::new(window, 8i64);
//! assert_eq!(variable.resolve(&env), 32);
//! # Ok::<(), fanhub::NameError>(())
//! ```

mod environment;
mod value;
mod variable;

pub use environment::{Environment, Lookup};
pub use value::Value;
pub use variable::{FromValue, Variable};

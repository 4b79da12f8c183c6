//! Store contract for prefsgen-generated settings classes.
//!
//! Generated code only ever talks to the traits in this crate: it reads and writes typed values through
//! [`PrefStore`], obtains a store either from a [`StoreContext`] passed to its constructor or through [`inject`], and
//! routes every write through the closed [`PrefValue`] union.
//!
//! The concrete persistence backend is supplied by the application. [`MemoryStore`] is an in-memory backend for
//! tests.

pub mod inject;
pub mod memory;
pub mod store;
pub mod value;

pub use inject::{InjectError, inject, install_provider};
pub use memory::{MemoryContext, MemoryStore, StoredValue};
pub use store::{PrefStore, StoreContext};
pub use value::PrefValue;

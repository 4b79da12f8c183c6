//! Provide the shared vocabulary of the prefsgen generator.
//!
//! Both the generator (`prefsgen`) and the `#[prefs]` attribute macro (`prefsgen_derive`) depend on this crate so that
//! they agree on:
//! - how identifiers become storage keys and generated constant names ([`naming`]),
//! - which scalar types a settings property may have ([`lang::scalars`]),
//! - how marker attributes are spelled and parsed ([`markers`]).
//!
//! ## Notes
//!
//! - Everything here is pure and deterministic: no IO, no global state, no generator-specific types.

pub mod lang;
pub mod markers;
pub mod naming;

pub use lang::scalars::ScalarType;
pub use markers::{Marker, SchemaMarker};

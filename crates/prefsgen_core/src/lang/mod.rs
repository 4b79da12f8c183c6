//! Settings vocabulary registries.
//!
//! Callers work with stable IDs (`ScalarType`) and the spelling constants in [`attributes`] instead of comparing
//! strings ad hoc.

pub mod attributes;
pub mod scalars;

//! prefsgen backend
//!
//! This module turns collected schemas into Rust source and writes it out.
//!
//! The pipeline is:
//! 1. `ClassSchema` → `ir::emit_schema` → `GeneratedUnit`
//! 2. `GeneratedUnit` → `ir::render_unit` → formatted Rust source
//! 3. `output::write_units` → files in the output directory
//!
//! ## Module Organization
//!
//! - `ir/` - Structured emission model, lowering and rendering
//! - `codegen.rs` - Batch facade (`Generator`, `GenerationError`, `BatchOutput`)
//! - `output.rs` - Output directory writer

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]

pub mod codegen;
pub mod ir;
pub mod output;

pub use codegen::{BatchOutput, CollectOutput, DeclarationFailure, GeneratedFile, GenerationError, Generator};
pub use ir::{EmitError, GeneratedUnit};
pub use output::{OutputError, write_units};

#![forbid(unsafe_code)]
//! prefsgen: settings implementations generated from `#[prefs]` traits
//!
//! A settings trait declares typed accessors. prefsgen collects a schema from it (properties, defaults, reset hooks)
//! and emits a struct that implements the trait on top of a key-value store from `prefsgen_runtime`.
//!
//! This crate provides the generator: frontends (Rust source, JSON manifests), schema collection, code emission, and
//! the build-script and CLI shells around them.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: Generated constructors propagate `InjectError` with `?` and never unwrap.

pub mod backend;
pub mod builder;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod frontend;
pub mod schema;
pub mod version;

pub use backend::{BatchOutput, GeneratedFile, GenerationError, Generator};
pub use builder::{BuildError, Builder};
pub use config::GenerateConfig;
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use schema::{ClassSchema, Declaration, MemberDecl};

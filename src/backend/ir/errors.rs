//! Define error types for schema → IR → Rust emission.

use miette::Diagnostic;
use prefsgen_core::ScalarType;
use thiserror::Error;

/// Error during emission of one settings class.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EmitError {
    /// The trait declares a writer for a type the store contract cannot write.
    #[error("property `{property}` of `{class}` has type {ty}, which the store cannot write")]
    #[diagnostic(
        code(prefsgen::emit::unsupported_type),
        help("writable types are Int, Bool, String, Long and Float; drop the writer to keep the property read-only")
    )]
    UnsupportedType {
        class: String,
        property: String,
        ty: ScalarType,
    },

    #[error("default `{value}` of `{class}.{property}` cannot be emitted as a {ty} literal")]
    #[diagnostic(code(prefsgen::emit::invalid_literal))]
    InvalidLiteral {
        class: String,
        property: String,
        ty: ScalarType,
        value: String,
    },

    /// Generated tokens did not form a valid Rust file.
    #[error("generated code for `{class}` did not parse: {message}")]
    #[diagnostic(code(prefsgen::emit::render))]
    Render { class: String, message: String },
}

//! Errors raised while collecting a declaration's schema.
//!
//! Each error aborts its own declaration only; the batch facade records it and moves on.

use miette::Diagnostic;
use thiserror::Error;

/// A declaration could not be turned into a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SchemaError {
    #[error("property `{property}` of `{class}` has unsupported type `{ty}`")]
    #[diagnostic(
        code(prefsgen::schema::unsupported_type),
        help("supported types are String, Int, Bool, Float, Double and Long")
    )]
    UnsupportedType { class: String, property: String, ty: String },

    #[error("default `{value}` of `{class}.{property}` is not a valid {ty}")]
    #[diagnostic(code(prefsgen::schema::invalid_default))]
    InvalidDefault {
        class: String,
        property: String,
        ty: String,
        value: String,
    },

    #[error("member `{member}` of `{class}` cannot be generated: {reason}")]
    #[diagnostic(code(prefsgen::schema::invalid_member))]
    InvalidMember { class: String, member: String, reason: String },

    #[error("property `{property}` of `{class}` is declared more than once")]
    #[diagnostic(
        code(prefsgen::schema::duplicate_property),
        help("readers are matched by storage key, so `unitId`, `getUnitId` and `unit_id` name the same property")
    )]
    DuplicateProperty { class: String, property: String },
}

impl SchemaError {
    /// The declaration the error belongs to.
    pub fn class(&self) -> &str {
        match self {
            SchemaError::UnsupportedType { class, .. }
            | SchemaError::InvalidDefault { class, .. }
            | SchemaError::InvalidMember { class, .. }
            | SchemaError::DuplicateProperty { class, .. } => class,
        }
    }
}

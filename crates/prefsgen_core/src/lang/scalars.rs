//! Scalar type registry.
//!
//! A settings property may only have one of six primitive types. This module maps between the canonical names used in
//! diagnostics, the spellings accepted from declarations, the Rust types used in generated code, and the method suffix
//! of the store operations (`get_int`, `put_int`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a supported property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Int,
    Bool,
    Float,
    Double,
    Long,
}

impl ScalarType {
    /// Every supported type, in canonical order.
    pub const ALL: [ScalarType; 6] = [
        ScalarType::String,
        ScalarType::Int,
        ScalarType::Bool,
        ScalarType::Float,
        ScalarType::Double,
        ScalarType::Long,
    ];

    /// Canonical name used in diagnostics and schema summaries.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Bool => "Bool",
            ScalarType::Float => "Float",
            ScalarType::Double => "Double",
            ScalarType::Long => "Long",
        }
    }

    /// Look up a type from a capitalized, path-stripped type name.
    ///
    /// Both Rust spellings (`I32`, `F64`, ...) and the descriptive spellings (`Int`, `Double`, ...) are accepted.
    ///
    /// ## Parameters
    /// - `name`: the type name with its first character already upper-cased.
    ///
    /// ## Returns
    /// - (`Option<ScalarType>`): `None` if the name is not one of the supported scalars.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" | "Str" => Some(ScalarType::String),
            "I32" | "Int" | "Integer" => Some(ScalarType::Int),
            "Bool" | "Boolean" => Some(ScalarType::Bool),
            "F32" | "Float" => Some(ScalarType::Float),
            "F64" | "Double" => Some(ScalarType::Double),
            "I64" | "Long" => Some(ScalarType::Long),
            _ => None,
        }
    }

    /// Rust type used for this scalar in generated code.
    pub fn rust_type(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "i32",
            ScalarType::Bool => "bool",
            ScalarType::Float => "f32",
            ScalarType::Double => "f64",
            ScalarType::Long => "i64",
        }
    }

    /// Suffix of the typed store operations (`get_<suffix>` / `put_<suffix>`).
    pub fn store_suffix(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Bool => "bool",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::Long => "long",
        }
    }

    /// Whether the store contract has a typed writer for this scalar.
    ///
    /// ## Notes
    /// - The store reads all six types but only writes five: there is no `put_double`.
    pub fn has_writer(self) -> bool {
        !matches!(self, ScalarType::Double)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comma-separated list of supported type names (for help messages).
pub fn supported_names() -> String {
    ScalarType::ALL.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for ty in ScalarType::ALL {
            assert_eq!(ScalarType::from_name(ty.name()), Some(ty));
        }
    }

    #[test]
    fn rust_spellings_resolve() {
        assert_eq!(ScalarType::from_name("I32"), Some(ScalarType::Int));
        assert_eq!(ScalarType::from_name("I64"), Some(ScalarType::Long));
        assert_eq!(ScalarType::from_name("F32"), Some(ScalarType::Float));
        assert_eq!(ScalarType::from_name("F64"), Some(ScalarType::Double));
        assert_eq!(ScalarType::from_name("Boolean"), Some(ScalarType::Bool));
        assert_eq!(ScalarType::from_name("Vec"), None);
        assert_eq!(ScalarType::from_name("u8"), None);
    }

    #[test]
    fn only_double_lacks_a_writer() {
        let without: Vec<_> = ScalarType::ALL.into_iter().filter(|t| !t.has_writer()).collect();
        assert_eq!(without, vec![ScalarType::Double]);
    }

    #[test]
    fn supported_names_lists_all_six() {
        assert_eq!(supported_names(), "String, Int, Bool, Float, Double, Long");
    }
}

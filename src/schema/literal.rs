//! Typed scalar literals for defaults and getter fallbacks.

use std::fmt;

use prefsgen_core::ScalarType;

/// A literal value of one of the supported scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarLiteral {
    String(String),
    Int(i32),
    Bool(bool),
    Float(f32),
    Double(f64),
    Long(i64),
}

impl ScalarLiteral {
    /// Parse a default literal as `ty`.
    ///
    /// ## Returns
    /// - `None` when `text` is not a valid literal of `ty` (including non-finite floats).
    pub fn parse(ty: ScalarType, text: &str) -> Option<Self> {
        let literal = match ty {
            ScalarType::String => ScalarLiteral::String(text.to_string()),
            ScalarType::Int => ScalarLiteral::Int(text.parse().ok()?),
            ScalarType::Bool => ScalarLiteral::Bool(text.parse().ok()?),
            ScalarType::Float => ScalarLiteral::Float(text.parse::<f32>().ok().filter(|v| v.is_finite())?),
            ScalarType::Double => ScalarLiteral::Double(text.parse::<f64>().ok().filter(|v| v.is_finite())?),
            ScalarType::Long => ScalarLiteral::Long(text.parse().ok()?),
        };
        Some(literal)
    }

    /// Getter fallback used when a property has no default: `""`, `-1` or `false`.
    pub fn fallback(ty: ScalarType) -> Self {
        match ty {
            ScalarType::String => ScalarLiteral::String(String::new()),
            ScalarType::Int => ScalarLiteral::Int(-1),
            ScalarType::Bool => ScalarLiteral::Bool(false),
            ScalarType::Float => ScalarLiteral::Float(-1.0),
            ScalarType::Double => ScalarLiteral::Double(-1.0),
            ScalarType::Long => ScalarLiteral::Long(-1),
        }
    }

    pub fn ty(&self) -> ScalarType {
        match self {
            ScalarLiteral::String(_) => ScalarType::String,
            ScalarLiteral::Int(_) => ScalarType::Int,
            ScalarLiteral::Bool(_) => ScalarType::Bool,
            ScalarLiteral::Float(_) => ScalarType::Float,
            ScalarLiteral::Double(_) => ScalarType::Double,
            ScalarLiteral::Long(_) => ScalarType::Long,
        }
    }
}

impl fmt::Display for ScalarLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarLiteral::String(s) => write!(f, "{s:?}"),
            ScalarLiteral::Int(v) => write!(f, "{v}"),
            ScalarLiteral::Bool(v) => write!(f, "{v}"),
            ScalarLiteral::Float(v) => write!(f, "{v:?}f32"),
            ScalarLiteral::Double(v) => write!(f, "{v:?}f64"),
            ScalarLiteral::Long(v) => write!(f, "{v}i64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults_per_type() {
        assert_eq!(ScalarLiteral::parse(ScalarType::Int, "20"), Some(ScalarLiteral::Int(20)));
        assert_eq!(ScalarLiteral::parse(ScalarType::Long, "-7"), Some(ScalarLiteral::Long(-7)));
        assert_eq!(ScalarLiteral::parse(ScalarType::Bool, "true"), Some(ScalarLiteral::Bool(true)));
        assert_eq!(ScalarLiteral::parse(ScalarType::Float, "1.5"), Some(ScalarLiteral::Float(1.5)));
        assert_eq!(
            ScalarLiteral::parse(ScalarType::String, "unit102"),
            Some(ScalarLiteral::String("unit102".to_string()))
        );
    }

    #[test]
    fn rejects_mismatched_literals() {
        assert_eq!(ScalarLiteral::parse(ScalarType::Int, "twenty"), None);
        assert_eq!(ScalarLiteral::parse(ScalarType::Int, "3000000000"), None);
        assert_eq!(ScalarLiteral::parse(ScalarType::Bool, "yes"), None);
        assert_eq!(ScalarLiteral::parse(ScalarType::Double, "inf"), None);
    }

    #[test]
    fn fallbacks_match_the_zero_value_table() {
        assert_eq!(ScalarLiteral::fallback(ScalarType::String), ScalarLiteral::String(String::new()));
        assert_eq!(ScalarLiteral::fallback(ScalarType::Int), ScalarLiteral::Int(-1));
        assert_eq!(ScalarLiteral::fallback(ScalarType::Bool), ScalarLiteral::Bool(false));
        assert_eq!(ScalarLiteral::fallback(ScalarType::Float), ScalarLiteral::Float(-1.0));
        assert_eq!(ScalarLiteral::fallback(ScalarType::Double), ScalarLiteral::Double(-1.0));
        assert_eq!(ScalarLiteral::fallback(ScalarType::Long), ScalarLiteral::Long(-1));
        for ty in ScalarType::ALL {
            assert_eq!(ScalarLiteral::fallback(ty).ty(), ty);
        }
    }

    #[test]
    fn display_is_rust_flavoured() {
        assert_eq!(ScalarLiteral::String("a\"b".into()).to_string(), r#""a\"b""#);
        assert_eq!(ScalarLiteral::Float(-1.0).to_string(), "-1.0f32");
        assert_eq!(ScalarLiteral::Long(-1).to_string(), "-1i64");
    }
}

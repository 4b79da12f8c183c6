//! Closed value union for generic writes.
//!
//! Typed setters wrap their argument in a [`PrefValue`] before calling the generated `put_value` routine, which
//! matches on the variant to pick the store writer. `Absent` removes the key instead of writing.

/// A value to be written to a store, or the absence of one.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Int(i32),
    Bool(bool),
    String(String),
    Long(i64),
    Float(f32),
    Absent,
}

impl PrefValue {
    /// Whether this value removes the key instead of writing it.
    pub fn is_absent(&self) -> bool {
        matches!(self, PrefValue::Absent)
    }

    /// Name of the carried type, for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::Int(_) => "Int",
            PrefValue::Bool(_) => "Bool",
            PrefValue::String(_) => "String",
            PrefValue::Long(_) => "Long",
            PrefValue::Float(_) => "Float",
            PrefValue::Absent => "Absent",
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PrefValue {
                fn from(value: $ty) -> Self {
                    PrefValue::$variant(value)
                }
            }

            impl From<Option<$ty>> for PrefValue {
                fn from(value: Option<$ty>) -> Self {
                    value.map_or(PrefValue::Absent, PrefValue::$variant)
                }
            }
        )*
    };
}

impl_from! {
    i32 => Int,
    bool => Bool,
    String => String,
    i64 => Long,
    f32 => Float,
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

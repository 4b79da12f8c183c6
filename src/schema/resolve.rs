//! Resolve property types and property names from accessor signatures.
//!
//! ## Notes
//! - A type is matched by its last path segment with the first character upper-cased, so `std::string::String`,
//!   `types.Int` (a dotted manifest spelling) and `i32` all resolve.
//! - The `get`/`set` prefix is only stripped at a word boundary: `getUnitId` and `get_unit_id` are `unitId` and
//!   `unit_id`, but `getaway` stays `getaway`.

use prefsgen_core::ScalarType;

/// Why a return type did not resolve to a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The simplified type name is not one of the supported scalars.
    Unsupported(String),
    /// The member returns nothing.
    Void,
}

/// Whether a return type means "returns nothing".
pub fn is_void(return_type: Option<&str>) -> bool {
    match return_type {
        None => true,
        Some(ty) => {
            let simple = simple_type_name(ty);
            simple.is_empty() || matches!(simple.as_str(), "()" | "Unit" | "Void")
        }
    }
}

/// Strip whitespace and any qualifying path, then upper-case the first character.
///
/// ## Examples
/// ```rust
/// use prefsgen::schema::resolve::simple_type_name;
///
/// assert_eq!(simple_type_name("std :: string :: String"), "String");
/// assert_eq!(simple_type_name("types.Int"), "Int");
/// assert_eq!(simple_type_name("i64"), "I64");
/// ```
pub fn simple_type_name(ty: &str) -> String {
    let ty = normalize(ty);
    let last = ty.rsplit([':', '.']).next().unwrap_or_default();
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve a reader's return type to its scalar.
pub fn resolve_type(return_type: Option<&str>) -> Result<ScalarType, ResolveError> {
    if is_void(return_type) {
        return Err(ResolveError::Void);
    }
    let simple = simple_type_name(return_type.unwrap_or_default());
    ScalarType::from_name(&simple).ok_or_else(|| ResolveError::Unsupported(normalize(return_type.unwrap_or_default())))
}

/// Property name of a reader: `unitId` → `unitId`, `getUnitId` → `unitId`, `get_unit_id` → `unit_id`.
pub fn property_name(accessor: &str) -> String {
    strip_accessor_prefix(accessor, "get").unwrap_or_else(|| accessor.to_string())
}

/// Property name of a writer, if the member is spelled like one (`setUnitId`, `set_unit_id`).
pub fn writer_property_name(member: &str) -> Option<String> {
    strip_accessor_prefix(member, "set")
}

fn strip_accessor_prefix(name: &str, prefix: &str) -> Option<String> {
    let rest = name.strip_prefix(prefix)?;
    if let Some(snake) = rest.strip_prefix('_') {
        return (!snake.is_empty()).then(|| snake.to_string());
    }
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}

fn normalize(ty: &str) -> String {
    ty.chars().filter(|c| !c.is_whitespace()).collect()
}

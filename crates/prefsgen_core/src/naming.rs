//! Derive storage keys and generated identifiers from declaration names.
//!
//! ## Notes
//! - A token splits an identifier before every ASCII uppercase letter past index 0, upper-cases each segment and joins
//!   them with `_`: `wifiPassword` → `WIFI_PASSWORD`. Snake_case input is just upper-cased: `unit_id` → `UNIT_ID`.
//! - Keys are qualified by package and class, so equal property names in different classes never collide.
//! - Keys are stable across regenerations. Renaming a property changes its key; there is no migration.

/// Prefix of every generated key constant.
pub const KEY_PREFIX: &str = "KEY_";

/// Suffix of the store-file key token and constant.
pub const STORE_KEY_SUFFIX: &str = "_PREFS";

/// Suffix appended to a declaration name to form the generated implementation name.
pub const IMPLEMENTATION_SUFFIX: &str = "Prefs";

/// Convert an identifier into its SCREAMING_SNAKE storage token.
///
/// ## Examples
/// ```rust
/// use prefsgen_core::naming::to_storage_token;
///
/// assert_eq!(to_storage_token("wifiPassword"), "WIFI_PASSWORD");
/// assert_eq!(to_storage_token("isCheckedIn"), "IS_CHECKED_IN");
/// assert_eq!(to_storage_token("unit_id"), "UNIT_ID");
/// ```
pub fn to_storage_token(identifier: &str) -> String {
    let mut segments = Vec::new();
    let mut start = 0;
    for (index, ch) in identifier.char_indices() {
        if index > 0 && ch.is_ascii_uppercase() {
            segments.push(identifier[start..index].to_uppercase());
            start = index;
        }
    }
    segments.push(identifier[start..].to_uppercase());
    segments.join("_")
}

/// Name of the generated constant holding a property's key (`KEY_<TOKEN>`).
pub fn property_key_const(identifier: &str) -> String {
    format!("{KEY_PREFIX}{}", to_storage_token(identifier))
}

/// Fully-qualified storage key of a property.
///
/// ## Parameters
/// - `package`: package (or module path) the declaration lives in.
/// - `class`: declaration name.
/// - `identifier`: property name.
///
/// ## Returns
/// - (`String`): `"{package}.{class}.{TOKEN}"`.
pub fn qualified_key(package: &str, class: &str, identifier: &str) -> String {
    format!("{package}.{class}.{}", to_storage_token(identifier))
}

/// Name of the generated constant holding the store-file key (`KEY_<CLASS_TOKEN>_PREFS`).
pub fn store_key_const(class: &str) -> String {
    format!("{KEY_PREFIX}{}{STORE_KEY_SUFFIX}", to_storage_token(class))
}

/// Fully-qualified store-file key: `"{package}.{class}.{CLASS_TOKEN}_PREFS"`.
pub fn qualified_store_key(package: &str, class: &str) -> String {
    format!("{package}.{class}.{}{STORE_KEY_SUFFIX}", to_storage_token(class))
}

/// Name of the generated implementation for a declaration (`AppSettings` → `AppSettingsPrefs`).
pub fn implementation_name(class: &str) -> String {
    format!("{class}{IMPLEMENTATION_SUFFIX}")
}

/// File name of the generated unit for a declaration (`AppSettings` → `app_settings_prefs.rs`).
pub fn output_file_name(class: &str) -> String {
    format!("{}{}.rs", to_storage_token(class).to_lowercase(), STORE_KEY_SUFFIX.to_lowercase())
}

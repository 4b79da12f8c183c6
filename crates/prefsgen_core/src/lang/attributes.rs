//! Marker attribute spellings.
//!
//! These are the attribute names recognized on a settings trait and its members, plus the named arguments they
//! accept.

/// Declaration marker: `#[prefs(...)]` on a trait.
pub const SCHEMA_MARKER: &str = "prefs";

/// Property marker carrying a default value: `#[default("v")]`.
pub const DEFAULT_MARKER: &str = "default";

/// Property marker carrying a default and a test value: `#[pref(default = "v", test = "t")]`.
pub const PREF_MARKER: &str = "pref";

/// Retention marker: `#[retain]` keeps a property across resets.
pub const RETAIN_MARKER: &str = "retain";

/// Reset hook marker: `#[on_reset]` on a zero-argument method.
pub const ON_RESET_MARKER: &str = "on_reset";

/// All member-level marker spellings.
pub const MEMBER_MARKERS: &[&str] = &[DEFAULT_MARKER, PREF_MARKER, RETAIN_MARKER, ON_RESET_MARKER];

/// Sentinel payload meaning "no value supplied".
pub const NULL_SENTINEL: &str = "[null]";

/// `#[prefs(private_property_keys = ..)]`
pub const OPT_PRIVATE_PROPERTY_KEYS: &str = "private_property_keys";
/// `#[prefs(private_store_key = ..)]`
pub const OPT_PRIVATE_STORE_KEY: &str = "private_store_key";
/// `#[prefs(use_injected_store = ..)]`
pub const OPT_USE_INJECTED_STORE: &str = "use_injected_store";
/// `#[prefs(show_traces = ..)]`
pub const OPT_SHOW_TRACES: &str = "show_traces";

/// Named value argument of `#[default(value = "v")]`.
pub const ARG_VALUE: &str = "value";
/// Named arguments of `#[pref(..)]`; the long forms are accepted as aliases.
pub const ARG_DEFAULT: &str = "default";
pub const ARG_DEFAULT_LONG: &str = "default_value";
pub const ARG_TEST: &str = "test";
pub const ARG_TEST_LONG: &str = "test_value";

/// Check whether an attribute name is one of the member-level markers.
pub fn is_member_marker_name(name: &str) -> bool {
    MEMBER_MARKERS.contains(&name)
}

/// Decode a marker payload, mapping the [`NULL_SENTINEL`] to `None`.
///
/// ## Examples
/// ```rust
/// use prefsgen_core::lang::attributes::decode_sentinel;
///
/// assert_eq!(decode_sentinel("[null]"), None);
/// assert_eq!(decode_sentinel("unit102"), Some("unit102"));
/// ```
pub fn decode_sentinel(raw: &str) -> Option<&str> {
    if raw == NULL_SENTINEL { None } else { Some(raw) }
}

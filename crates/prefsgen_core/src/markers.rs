//! Marker model and attribute parsing.
//!
//! Markers are the declarative metadata attached to a settings trait (`#[prefs(..)]`) and to its members
//! (`#[default(..)]`, `#[pref(..)]`, `#[retain]`, `#[on_reset]`). The same model is produced by the Rust-source
//! frontend (via [`parse_member_marker`]) and by JSON manifests (via serde), so the schema collector never sees the
//! concrete syntax.
//!
//! ## Notes
//! - Payloads keep the raw `"[null]"` sentinel; use [`Marker::default_value`] / [`Marker::test_value`] to decode.
//! - Literal payloads may be written as strings or as bare literals: `#[default(20)]` and `#[default("20")]` are the
//!   same marker.

use proc_macro2::TokenStream;
use serde::{Deserialize, Serialize};
use syn::meta::ParseNestedMeta;
use syn::parse::{ParseStream, Parser};
use syn::{Attribute, Ident, Lit, LitBool, Meta, Token};

use crate::lang::attributes::{
    ARG_DEFAULT, ARG_DEFAULT_LONG, ARG_TEST, ARG_TEST_LONG, ARG_VALUE, DEFAULT_MARKER, NULL_SENTINEL,
    ON_RESET_MARKER, OPT_PRIVATE_PROPERTY_KEYS, OPT_PRIVATE_STORE_KEY, OPT_SHOW_TRACES, OPT_USE_INJECTED_STORE,
    PREF_MARKER, RETAIN_MARKER, SCHEMA_MARKER, decode_sentinel, is_member_marker_name,
};

/// Options carried by the declaration marker.
///
/// Every switch is optional so that each one falls back to its own default independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaMarker {
    pub private_property_keys: Option<bool>,
    pub private_store_key: Option<bool>,
    pub use_injected_store: Option<bool>,
    pub show_traces: Option<bool>,
}

impl SchemaMarker {
    /// Apply one `name = bool` (or bare `name`) option.
    fn apply(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let slot = if meta.path.is_ident(OPT_PRIVATE_PROPERTY_KEYS) {
            &mut self.private_property_keys
        } else if meta.path.is_ident(OPT_PRIVATE_STORE_KEY) {
            &mut self.private_store_key
        } else if meta.path.is_ident(OPT_USE_INJECTED_STORE) {
            &mut self.use_injected_store
        } else if meta.path.is_ident(OPT_SHOW_TRACES) {
            &mut self.show_traces
        } else {
            return Err(meta.error(format!(
                "unknown `{SCHEMA_MARKER}` option; expected one of `{OPT_PRIVATE_PROPERTY_KEYS}`, \
                 `{OPT_PRIVATE_STORE_KEY}`, `{OPT_USE_INJECTED_STORE}`, `{OPT_SHOW_TRACES}`"
            )));
        };
        if slot.is_some() {
            return Err(meta.error(format!("duplicate `{SCHEMA_MARKER}` option")));
        }
        let value = if meta.input.peek(Token![=]) {
            meta.value()?.parse::<LitBool>()?.value
        } else {
            true
        };
        *slot = Some(value);
        Ok(())
    }
}

/// A member-level marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    /// Default value for a property.
    Default {
        #[serde(default = "null_sentinel")]
        value: String,
    },
    /// Default value plus a test value for a property.
    Pref {
        #[serde(default = "null_sentinel")]
        default_value: String,
        #[serde(default = "null_sentinel")]
        test_value: String,
    },
    /// Keep the property when a reset hook runs.
    Retain,
    /// The member is a reset hook.
    OnReset,
}

fn null_sentinel() -> String {
    NULL_SENTINEL.to_string()
}

impl Marker {
    /// Attribute spelling of this marker.
    pub fn name(&self) -> &'static str {
        match self {
            Marker::Default { .. } => DEFAULT_MARKER,
            Marker::Pref { .. } => PREF_MARKER,
            Marker::Retain => RETAIN_MARKER,
            Marker::OnReset => ON_RESET_MARKER,
        }
    }

    /// Decoded default value, if this marker carries one that is not the sentinel.
    pub fn default_value(&self) -> Option<&str> {
        match self {
            Marker::Default { value } => decode_sentinel(value),
            Marker::Pref { default_value, .. } => decode_sentinel(default_value),
            Marker::Retain | Marker::OnReset => None,
        }
    }

    /// Decoded test value, if this marker carries one that is not the sentinel.
    pub fn test_value(&self) -> Option<&str> {
        match self {
            Marker::Pref { test_value, .. } => decode_sentinel(test_value),
            _ => None,
        }
    }

    /// Whether this marker can carry a default or test value.
    pub fn carries_values(&self) -> bool {
        matches!(self, Marker::Default { .. } | Marker::Pref { .. })
    }
}

/// Check whether an attribute is the declaration marker (`#[prefs]` or `#[some::path::prefs]`).
pub fn is_schema_marker(attr: &Attribute) -> bool {
    attr.path().segments.last().is_some_and(|seg| seg.ident == SCHEMA_MARKER)
}

/// Check whether an attribute is one of the member-level markers.
pub fn is_member_marker(attr: &Attribute) -> bool {
    attr.path().get_ident().is_some_and(|ident| is_member_marker_name(&ident.to_string()))
}

/// Find the declaration marker among a trait's attributes.
pub fn find_schema_marker(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|attr| is_schema_marker(attr))
}

/// Parse the declaration marker attribute.
///
/// ## Parameters
/// - `attr`: a `#[prefs]` or `#[prefs(..)]` attribute.
///
/// ## Returns
/// - (`SchemaMarker`): the options that were spelled out; omitted options stay `None`.
///
/// ## Errors
/// - Unknown or duplicate options, and non-bool values.
pub fn parse_schema_marker(attr: &Attribute) -> syn::Result<SchemaMarker> {
    let mut marker = SchemaMarker::default();
    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(_) => attr.parse_nested_meta(|meta| marker.apply(meta))?,
        Meta::NameValue(nv) => {
            return Err(syn::Error::new_spanned(nv, format!("expected `#[{SCHEMA_MARKER}(..)]`")));
        }
    }
    Ok(marker)
}

/// Parse the argument tokens of the `#[prefs(..)]` attribute macro.
pub fn parse_schema_args(args: TokenStream) -> syn::Result<SchemaMarker> {
    let mut marker = SchemaMarker::default();
    let parser = syn::meta::parser(|meta| marker.apply(meta));
    parser.parse2(args)?;
    Ok(marker)
}

/// Parse a member-level marker.
///
/// ## Returns
/// - `Ok(None)` if the attribute is not a marker (for example `#[doc]`).
/// - `Ok(Some(marker))` for a well-formed marker.
///
/// ## Errors
/// - Malformed marker payloads (wrong argument names, non-literal values, payload on `#[retain]`/`#[on_reset]`).
pub fn parse_member_marker(attr: &Attribute) -> syn::Result<Option<Marker>> {
    let Some(ident) = attr.path().get_ident() else {
        return Ok(None);
    };
    let name = ident.to_string();
    let marker = match name.as_str() {
        DEFAULT_MARKER => parse_default(attr)?,
        PREF_MARKER => parse_pref(attr)?,
        RETAIN_MARKER => {
            attr.meta.require_path_only()?;
            Marker::Retain
        }
        ON_RESET_MARKER => {
            attr.meta.require_path_only()?;
            Marker::OnReset
        }
        _ => return Ok(None),
    };
    Ok(Some(marker))
}

/// Parse every member marker in an attribute list, skipping unrelated attributes.
pub fn parse_member_markers(attrs: &[Attribute]) -> syn::Result<Vec<Marker>> {
    let mut markers = Vec::new();
    for attr in attrs {
        if let Some(marker) = parse_member_marker(attr)? {
            markers.push(marker);
        }
    }
    Ok(markers)
}

fn parse_default(attr: &Attribute) -> syn::Result<Marker> {
    let value = match &attr.meta {
        Meta::Path(_) => null_sentinel(),
        Meta::List(_) => attr.parse_args_with(parse_default_args)?,
        Meta::NameValue(nv) => {
            return Err(syn::Error::new_spanned(nv, format!("expected `#[{DEFAULT_MARKER}(\"value\")]`")));
        }
    };
    Ok(Marker::Default { value })
}

fn parse_default_args(input: ParseStream) -> syn::Result<String> {
    if input.peek(Ident) && input.peek2(Token![=]) {
        let ident: Ident = input.parse()?;
        if ident != ARG_VALUE {
            return Err(syn::Error::new(ident.span(), format!("expected `{ARG_VALUE} = ..`")));
        }
        input.parse::<Token![=]>()?;
    }
    parse_literal_payload(input)
}

fn parse_pref(attr: &Attribute) -> syn::Result<Marker> {
    let mut default_value = None;
    let mut test_value = None;
    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(_) => attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident(ARG_DEFAULT) || meta.path.is_ident(ARG_DEFAULT_LONG) {
                &mut default_value
            } else if meta.path.is_ident(ARG_TEST) || meta.path.is_ident(ARG_TEST_LONG) {
                &mut test_value
            } else {
                return Err(meta.error(format!("expected `{ARG_DEFAULT} = ..` or `{ARG_TEST} = ..`")));
            };
            if slot.is_some() {
                return Err(meta.error(format!("duplicate `{PREF_MARKER}` argument")));
            }
            *slot = Some(parse_literal_payload(meta.value()?)?);
            Ok(())
        })?,
        Meta::NameValue(nv) => {
            return Err(syn::Error::new_spanned(nv, format!("expected `#[{PREF_MARKER}(..)]`")));
        }
    }
    Ok(Marker::Pref {
        default_value: default_value.unwrap_or_else(null_sentinel),
        test_value: test_value.unwrap_or_else(null_sentinel),
    })
}

/// Read a literal payload as text: strings keep their value, numbers keep their digits, bools become `true`/`false`.
fn parse_literal_payload(input: ParseStream) -> syn::Result<String> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let lit: Lit = input.parse()?;
    let text = match &lit {
        Lit::Str(s) if !negative => s.value(),
        Lit::Int(i) => i.base10_digits().to_string(),
        Lit::Float(f) => f.base10_digits().to_string(),
        Lit::Bool(b) if !negative => b.value.to_string(),
        _ => {
            return Err(syn::Error::new(
                lit.span(),
                "expected a string, integer, float or bool literal",
            ));
        }
    };
    Ok(if negative { format!("-{text}") } else { text })
}

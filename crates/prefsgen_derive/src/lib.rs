//! The `#[prefs]` attribute macro.
//!
//! Settings traits carry marker attributes (`#[default]`, `#[pref]`, `#[retain]`, `#[on_reset]`) that only mean
//! something to the generator. This macro checks every marker with the generator's own parser, reports malformed ones
//! as compile errors, and strips them so the trait compiles as plain Rust.
//!
//! # Example
//! ```ignore
//! #[prefsgen_derive::prefs(private_property_keys = false)]
//! pub trait AppSettings {
//!     #[default("unit102")]
//!     fn unit_id(&self) -> String;
//!     #[retain]
//!     fn is_checked_in(&self) -> bool;
//!     #[on_reset]
//!     fn reset(&mut self);
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, ItemTrait, TraitItem};

use prefsgen_core::markers::{is_member_marker, parse_member_markers, parse_schema_args};

/// Validate the declaration options and member markers of a settings trait, then strip the markers.
#[proc_macro_attribute]
pub fn prefs(args: TokenStream, input: TokenStream) -> TokenStream {
    match expand(args.into(), input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: TokenStream2, input: TokenStream2) -> syn::Result<TokenStream2> {
    let mut errors: Vec<syn::Error> = Vec::new();
    if let Err(err) = parse_schema_args(args) {
        errors.push(err);
    }

    let mut item: ItemTrait = match syn::parse2(input) {
        Ok(item) => item,
        Err(err) => {
            return Err(match combine(errors) {
                Some(mut all) => {
                    all.combine(err);
                    all
                }
                None => err,
            });
        }
    };

    let mut push = |err: syn::Error| errors.push(err);
    for member in &mut item.items {
        match member {
            TraitItem::Fn(func) => {
                if let Err(err) = parse_member_markers(&func.attrs) {
                    push(err);
                }
                strip_markers(&mut func.attrs);
            }
            TraitItem::Const(c) => reject_markers(&mut c.attrs, &mut push),
            TraitItem::Type(t) => reject_markers(&mut t.attrs, &mut push),
            _ => {}
        }
    }

    match combine(errors) {
        Some(err) => Err(err),
        None => Ok(quote!(#item)),
    }
}

/// Fold every error into one, in the order they were found.
fn combine(errors: Vec<syn::Error>) -> Option<syn::Error> {
    errors.into_iter().reduce(|mut all, err| {
        all.combine(err);
        all
    })
}

fn strip_markers(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !is_member_marker(attr));
}

// Markers only make sense on methods.
fn reject_markers(attrs: &mut Vec<Attribute>, push: &mut impl FnMut(syn::Error)) {
    for attr in attrs.iter().filter(|attr| is_member_marker(attr)) {
        push(syn::Error::new_spanned(attr, "settings markers are only allowed on trait methods"));
    }
    strip_markers(attrs);
}

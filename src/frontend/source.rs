//! Discover `#[prefs]` traits in Rust source.
//!
//! ## Notes
//! - Traits are found at the top level and inside inline `mod { .. }` blocks. Out-of-line modules are separate
//!   input files.
//! - Types are recorded as written, with whitespace removed (`std::string::String`, `i32`).

use std::fs;
use std::path::Path;

use quote::ToTokens;
use syn::{FnArg, Item, ItemTrait, Pat, ReturnType, TraitItem, TraitItemFn};

use prefsgen_core::markers::{find_schema_marker, parse_member_markers, parse_schema_marker};

use super::DiscoveryError;
use crate::schema::{AccessorSignature, Declaration, MemberDecl, ParamSig, Receiver};

/// Read a Rust file and return its settings declarations.
pub fn discover_file(path: &Path, package: &str) -> Result<Vec<Declaration>, DiscoveryError> {
    let source = fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_declarations(&source, path, package)
}

/// Parse Rust source and return its settings declarations, in source order.
///
/// ## Parameters
/// - `source`: file contents.
/// - `origin`: path used in error messages.
/// - `package`: package recorded on every declaration.
#[tracing::instrument(skip_all, fields(origin = %origin.display()))]
pub fn parse_declarations(source: &str, origin: &Path, package: &str) -> Result<Vec<Declaration>, DiscoveryError> {
    let file = syn::parse_file(source).map_err(|e| DiscoveryError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut declarations = Vec::new();
    walk_items(&file.items, origin, package, &mut declarations)?;
    tracing::debug!(declarations = declarations.len(), "discovered");
    Ok(declarations)
}

fn walk_items(
    items: &[Item],
    origin: &Path,
    package: &str,
    out: &mut Vec<Declaration>,
) -> Result<(), DiscoveryError> {
    for item in items {
        match item {
            Item::Trait(item_trait) => {
                if let Some(declaration) = declaration_from_trait(item_trait, origin, package)? {
                    out.push(declaration);
                }
            }
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    walk_items(items, origin, package, out)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn declaration_from_trait(
    item_trait: &ItemTrait,
    origin: &Path,
    package: &str,
) -> Result<Option<Declaration>, DiscoveryError> {
    let Some(attr) = find_schema_marker(&item_trait.attrs) else {
        return Ok(None);
    };
    let name = item_trait.ident.to_string();
    let marker_error = |item: &str, err: syn::Error| DiscoveryError::Marker {
        path: origin.to_path_buf(),
        item: item.to_string(),
        message: err.to_string(),
    };

    let marker = parse_schema_marker(attr).map_err(|e| marker_error(&name, e))?;
    let mut declaration = Declaration::new(&name, package).with_marker(marker);
    for member in &item_trait.items {
        if let TraitItem::Fn(func) = member {
            let qualified = format!("{name}::{}", func.sig.ident);
            let markers = parse_member_markers(&func.attrs).map_err(|e| marker_error(&qualified, e))?;
            declaration.members.push(MemberDecl {
                name: func.sig.ident.to_string(),
                markers,
                signature: signature(func),
                provided: func.default.is_some(),
            });
        }
    }
    Ok(Some(declaration))
}

fn signature(func: &TraitItemFn) -> AccessorSignature {
    let mut receiver = Receiver::None;
    let mut params = Vec::new();
    for input in &func.sig.inputs {
        match input {
            FnArg::Receiver(r) => {
                receiver = match (&r.reference, &r.mutability) {
                    (Some(_), Some(_)) => Receiver::RefMut,
                    (Some(_), None) => Receiver::Ref,
                    (None, _) => Receiver::Value,
                };
            }
            FnArg::Typed(pat) => params.push(ParamSig {
                name: match pat.pat.as_ref() {
                    Pat::Ident(ident) => ident.ident.to_string(),
                    _ => "_".to_string(),
                },
                ty: type_string(&pat.ty),
            }),
        }
    }
    let return_type = match &func.sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some(type_string(ty)),
    };
    AccessorSignature {
        receiver,
        params,
        return_type,
    }
}

fn type_string(ty: &syn::Type) -> String {
    ty.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

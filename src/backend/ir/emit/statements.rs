//! Statement, type and literal emission.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{LitFloat, LitInt};

use prefsgen_core::ScalarType;

use super::super::lower::PUT_VALUE;
use super::super::{DispatchArm, IrStmt, StoreHandle};
use super::{Cx, EmitError};
use crate::schema::ScalarLiteral;

impl Cx<'_> {
    pub(super) fn stmt(&self, stmt: &IrStmt) -> Result<TokenStream, EmitError> {
        let runtime = self.runtime;
        let tokens = match stmt {
            IrStmt::Construct(StoreHandle::Context { key_const }) => {
                let key = self.ident(key_const)?;
                quote! {
                    Self { store: context.open_store(Self::#key) }
                }
            }
            IrStmt::Construct(StoreHandle::Injected { key_const }) => {
                let key = self.ident(key_const)?;
                quote! {
                    ::std::result::Result::Ok(Self { store: #runtime::inject(Self::#key)? })
                }
            }
            IrStmt::Read { key_const, ty, fallback } => {
                let key = self.ident(key_const)?;
                let get = format_ident!("get_{}", ty.store_suffix());
                let fallback = literal(fallback);
                quote!(self.store.#get(Self::#key, #fallback))
            }
            IrStmt::Write { key_const, ty, param } => {
                let key = self.ident(key_const)?;
                let param = self.ident(param)?;
                let put_value = format_ident!("{}", PUT_VALUE);
                let variant = format_ident!("{}", ty.name());
                quote!(self.#put_value(Self::#key, #runtime::PrefValue::#variant(#param));)
            }
            IrStmt::Dispatch { arms } => {
                let arms = arms.iter().map(|arm| match arm {
                    DispatchArm::Absent => quote!(#runtime::PrefValue::Absent => self.store.remove(key)),
                    DispatchArm::Write(ty) => {
                        let variant = format_ident!("{}", ty.name());
                        let put = format_ident!("put_{}", ty.store_suffix());
                        quote!(#runtime::PrefValue::#variant(value) => self.store.#put(key, value))
                    }
                });
                quote! {
                    match value {
                        #(#arms,)*
                    }
                }
            }
            IrStmt::Remove { key_const } => {
                let key = self.ident(key_const)?;
                quote!(self.store.remove(Self::#key);)
            }
            IrStmt::Commit => quote!(self.store.commit();),
        };
        Ok(tokens)
    }
}

/// Rust type of a scalar in generated signatures.
pub(super) fn scalar_type(ty: ScalarType) -> TokenStream {
    let ident = format_ident!("{}", ty.rust_type());
    quote!(#ident)
}

/// Literal tokens for a getter fallback. Negative numbers are emitted as a negated literal.
fn literal(value: &ScalarLiteral) -> TokenStream {
    match value {
        ScalarLiteral::String(s) => quote!(#s),
        ScalarLiteral::Bool(b) => quote!(#b),
        ScalarLiteral::Int(v) => negated(*v < 0, int(v.unsigned_abs().to_string())),
        ScalarLiteral::Long(v) => negated(*v < 0, int(format!("{}i64", v.unsigned_abs()))),
        ScalarLiteral::Float(v) => negated(v.is_sign_negative(), float(format!("{:?}f32", v.abs()))),
        ScalarLiteral::Double(v) => negated(v.is_sign_negative(), float(format!("{:?}f64", v.abs()))),
    }
}

fn int(repr: String) -> TokenStream {
    let lit = LitInt::new(&repr, Span::call_site());
    quote!(#lit)
}

fn float(repr: String) -> TokenStream {
    let lit = LitFloat::new(&repr, Span::call_site());
    quote!(#lit)
}

fn negated(negative: bool, tokens: TokenStream) -> TokenStream {
    if negative { quote!(-#tokens) } else { tokens }
}

//! Emit Rust source code from a [`GeneratedUnit`].
//!
//! ## Notes
//! - Emission builds tokens with `quote!`, parses them back as a `syn::File` and formats them via `prettyplease`.
//! - Generated code is meant to be `include!`d next to its trait, so every runtime item is spelled with the full
//!   runtime path and no `use` items are emitted.
//! - Emission is codegen-only: it does not read or write files.
//!
//! ## See also
//! - [`statements`]: statement and literal emission

mod statements;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path};

use super::{EmitError, GeneratedUnit, KeyConstant, Method, ParamType, ReturnType, SelfParam};
use crate::config::GenerateConfig;
use crate::version::PREFSGEN_VERSION;

/// Render a unit to formatted Rust source.
///
/// ## Parameters
/// - `unit`: the lowered class.
/// - `config`: supplies the runtime crate path and whether to prepend the `@generated` header.
///
/// ## Errors
/// - [`EmitError::Render`] if a name is not a valid identifier, the runtime path does not parse, or the generated
///   tokens do not form a valid file.
#[tracing::instrument(skip_all, fields(class = %unit.class.trait_name))]
pub fn render_unit(unit: &GeneratedUnit, config: &GenerateConfig) -> Result<String, EmitError> {
    let class = unit.class.trait_name.as_str();
    let runtime: Path = syn::parse_str(&config.runtime_crate)
        .map_err(|e| render_error(class, format!("invalid runtime path `{}`: {e}", config.runtime_crate)))?;
    let tokens = unit_tokens(unit, &runtime)?;
    let file: syn::File = syn::parse2(tokens).map_err(|e| render_error(class, e.to_string()))?;
    let formatted = prettyplease::unparse(&file);
    if config.header {
        Ok(format!("// @generated by prefsgen v{PREFSGEN_VERSION}. Do not edit.\n\n{formatted}"))
    } else {
        Ok(formatted)
    }
}

/// Build the token stream of a unit: the struct, its inherent impl and its trait impl.
pub fn unit_tokens(unit: &GeneratedUnit, runtime: &Path) -> Result<TokenStream, EmitError> {
    let class = &unit.class;
    let cx = Cx {
        class: &class.trait_name,
        runtime,
    };
    let name = cx.ident(&class.name)?;
    let trait_name = cx.ident(&class.trait_name)?;
    let constants = class
        .constants
        .iter()
        .map(|c| cx.constant(c))
        .collect::<Result<Vec<_>, _>>()?;
    let inherent = class
        .inherent
        .iter()
        .map(|m| cx.method(m))
        .collect::<Result<Vec<_>, _>>()?;
    let trait_methods = class
        .trait_methods
        .iter()
        .map(|m| cx.method(m))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        pub struct #name {
            store: ::std::boxed::Box<dyn #runtime::PrefStore>,
        }

        impl #name {
            #(#constants)*
            #(#inherent)*
        }

        impl #trait_name for #name {
            #(#trait_methods)*
        }
    })
}

/// Emission context for one class.
struct Cx<'a> {
    class: &'a str,
    runtime: &'a Path,
}

impl Cx<'_> {
    fn ident(&self, name: &str) -> Result<Ident, EmitError> {
        syn::parse_str(name).map_err(|_| render_error(self.class, format!("`{name}` is not a valid identifier")))
    }

    fn constant(&self, constant: &KeyConstant) -> Result<TokenStream, EmitError> {
        let vis = visibility(constant.public);
        let name = self.ident(&constant.name)?;
        let value = &constant.value;
        Ok(quote!(#vis const #name: &'static str = #value;))
    }

    fn method(&self, method: &Method) -> Result<TokenStream, EmitError> {
        let vis = visibility(method.public);
        let name = self.ident(&method.name)?;
        let receiver = match method.receiver {
            SelfParam::None => None,
            SelfParam::Ref => Some(quote!(&self)),
            SelfParam::RefMut => Some(quote!(&mut self)),
        };
        let params = method
            .params
            .iter()
            .map(|param| {
                let name = self.ident(&param.name)?;
                let ty = self.param_type(param.ty);
                Ok(quote!(#name: #ty))
            })
            .collect::<Result<Vec<_>, EmitError>>()?;
        let inputs = receiver.into_iter().chain(params);
        let output = self.return_type(method.returns);
        let body = method
            .body
            .iter()
            .map(|stmt| self.stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quote! {
            #vis fn #name(#(#inputs),*) #output {
                #(#body)*
            }
        })
    }

    fn param_type(&self, ty: ParamType) -> TokenStream {
        let runtime = self.runtime;
        match ty {
            ParamType::Scalar(scalar) => statements::scalar_type(scalar),
            ParamType::StoreContext => quote!(&dyn #runtime::StoreContext),
            ParamType::Key => quote!(&str),
            ParamType::Value => quote!(#runtime::PrefValue),
        }
    }

    fn return_type(&self, ty: ReturnType) -> TokenStream {
        let runtime = self.runtime;
        match ty {
            ReturnType::Unit => TokenStream::new(),
            ReturnType::Scalar(scalar) => {
                let ty = statements::scalar_type(scalar);
                quote!(-> #ty)
            }
            ReturnType::SelfValue => quote!(-> Self),
            ReturnType::SelfOrInjectError => quote!(-> ::std::result::Result<Self, #runtime::InjectError>),
        }
    }
}

fn visibility(public: bool) -> Option<TokenStream> {
    public.then(|| quote!(pub))
}

fn render_error(class: &str, message: String) -> EmitError {
    EmitError::Render {
        class: class.to_string(),
        message,
    }
}

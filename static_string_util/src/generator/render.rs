//! Rendering of a [`GeneratedUnit`] as Rust source.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

use super::{GeneratedFunction, GeneratedUnit};
use crate::config::{FUNCTION_NAME, FieldRendering, TRAIT_NAME};
use crate::error::EmitError;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by static_string_util. Do not edit.\n";

/// Renders `unit` as formatted Rust source, header included.
///
/// # Errors
///
/// Returns [`EmitError::Render`] when a name in the unit cannot be turned
/// into tokens or the assembled tokens do not form a valid file.
pub fn render(unit: &GeneratedUnit) -> Result<String, EmitError> {
    let tokens = unit_tokens(unit)?;
    let file: syn::File =
        syn::parse2(tokens).map_err(|err| EmitError::Render(err.to_string()))?;
    Ok(format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)))
}

/// Builds the `format!` template for one type.
///
/// Each field contributes `name='<value>',`, the trailing comma included,
/// and the segments are wrapped in `Name{` and `}`. Literal braces are
/// doubled. A type without fields yields `Name{{}}`, which formats as
/// `Name{}`.
#[must_use]
pub fn format_template(simple_name: &str, fields: &[String], rendering: FieldRendering) -> String {
    let placeholder = rendering.placeholder();
    let mut template = escape(simple_name);
    template.push_str("{{");
    for field in fields {
        template.push_str(&escape(field));
        template.push_str("='");
        template.push_str(placeholder);
        template.push_str("',");
    }
    template.push_str("}}");
    template
}

fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Accessor tokens for a field: an index for tuple fields, an identifier
/// (raw when it is a keyword) otherwise.
pub(super) fn member(field: &str) -> Option<syn::Member> {
    if let Ok(index) = field.parse::<usize>() {
        return Some(syn::Member::Unnamed(syn::Index::from(index)));
    }
    if let Ok(ident) = syn::parse_str::<Ident>(field) {
        return Some(syn::Member::Named(ident));
    }
    let raw = syn::parse_str::<Ident>(&format!("r#{field}")).ok()?;
    Some(syn::Member::Named(raw))
}

fn unit_tokens(unit: &GeneratedUnit) -> Result<TokenStream, EmitError> {
    let type_ident = syn::parse_str::<Ident>(&unit.type_name)
        .map_err(|err| EmitError::Render(format!("type name '{}': {err}", unit.type_name)))?;
    let runtime = syn::parse_str::<syn::Path>(&unit.runtime_crate).map_err(|err| {
        EmitError::Render(format!("runtime crate '{}': {err}", unit.runtime_crate))
    })?;
    let doc = format!(
        " `{TRAIT_NAME}` implementations for the {} marked type(s) of this crate.",
        unit.functions.len()
    );
    let impls = unit
        .functions
        .iter()
        .map(|function| function_tokens(function, &type_ident, &runtime, unit.field_rendering))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #[doc = #doc]
        pub struct #type_ident;

        #(#impls)*
    })
}

fn function_tokens(
    function: &GeneratedFunction,
    type_ident: &Ident,
    runtime: &syn::Path,
    rendering: FieldRendering,
) -> Result<TokenStream, EmitError> {
    let ty = syn::parse_str::<syn::Path>(&function.type_path)
        .map_err(|err| EmitError::Render(format!("type '{}': {err}", function.type_path)))?;
    let trait_ident = format_ident!("{}", TRAIT_NAME);
    let fn_ident = Ident::new(FUNCTION_NAME, Span::call_site());

    // A body that never reads the instance takes it as `_instance`.
    let (param, body) = if function.fields.is_empty() {
        let text = format!("{}{{}}", function.simple_name);
        (
            format_ident!("_instance"),
            quote! { ::std::string::String::from(#text) },
        )
    } else {
        let template = format_template(&function.simple_name, &function.fields, rendering);
        let members = function
            .fields
            .iter()
            .map(|field| {
                member(field)
                    .ok_or_else(|| EmitError::Render(format!("field '{field}' is not a name")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        (
            format_ident!("instance"),
            quote! { ::std::format!(#template, #(instance.#members),*) },
        )
    };

    Ok(quote! {
        impl #runtime::#trait_ident<#ty> for #type_ident {
            fn #fn_ident(#param: &#ty) -> ::std::string::String {
                #body
            }
        }
    })
}

//! Expansion of the `#[static_string_util]` marker attribute.

use proc_macro2::TokenStream;
use syn::Item;

const MARKER: &str = "#[static_string_util]";

/// Checks the marker placement and returns the item tokens unchanged.
///
/// Errors are spanned at the offending tokens so the compiler points at the
/// argument list or the misplaced item.
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            format!("{MARKER} takes no arguments"),
        ));
    }

    let parsed: Item = syn::parse2(item.clone())?;
    match parsed {
        Item::Struct(_) | Item::Enum(_) | Item::Union(_) | Item::Trait(_) => Ok(item),
        other => Err(syn::Error::new_spanned(
            other,
            format!("{MARKER} can only be applied to type declarations"),
        )),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for marker placement rules.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use quote::quote;
    use rstest::rstest;

    #[rstest]
    #[case::named_struct(quote! { pub struct User { name: String } })]
    #[case::tuple_struct(quote! { pub struct Meters(f64); })]
    #[case::unit_struct(quote! { pub struct Ping; })]
    #[case::enumeration(quote! { pub enum Level { Low, High } })]
    #[case::union_item(quote! { pub union Bits { int: u32, float: f32 } })]
    #[case::trait_item(quote! { pub trait Shape { fn area(&self) -> f64; } })]
    fn passes_type_declarations_through(#[case] item: TokenStream) -> Result<()> {
        let expanded = expand(TokenStream::new(), item.clone()).map_err(|err| anyhow!("{err}"))?;
        ensure!(
            expanded.to_string() == item.to_string(),
            "marker must not alter the item: {expanded} != {item}"
        );
        Ok(())
    }

    #[rstest]
    #[case::function(quote! { pub fn helper() {} })]
    #[case::constant(quote! { pub const LIMIT: u32 = 3; })]
    #[case::module(quote! { mod inner {} })]
    #[case::impl_block(quote! { impl User {} })]
    fn rejects_non_type_items(#[case] item: TokenStream) -> Result<()> {
        let Err(err) = expand(TokenStream::new(), item) else {
            return Err(anyhow!("non-type item should be rejected"));
        };
        ensure!(
            err.to_string().contains("can only be applied to type declarations"),
            "unexpected message: {err}"
        );
        Ok(())
    }

    #[rstest]
    fn rejects_arguments() -> Result<()> {
        let Err(err) = expand(quote! { skip = "name" }, quote! { pub struct User; }) else {
            return Err(anyhow!("arguments should be rejected"));
        };
        ensure!(
            err.to_string() == "#[static_string_util] takes no arguments",
            "unexpected message: {err}"
        );
        Ok(())
    }
}

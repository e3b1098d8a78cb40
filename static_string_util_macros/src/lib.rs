//! Procedural macros for `static_string_util`.
//!
//! The crate provides the [`macro@static_string_util`] marker attribute. The
//! attribute carries no data and expands to the unchanged item; its only job
//! is to tag a type declaration so the build-time generator in
//! `static_string_util` can find it while scanning the crate's sources.

use proc_macro::TokenStream;

mod marker;

/// Marks a type declaration for string-helper generation.
///
/// The attribute accepts no arguments and may only be placed on `struct`,
/// `enum`, `union` or `trait` items. It leaves the item untouched, so nothing
/// of it survives compilation.
///
/// ```rust,ignore
/// use static_string_util::static_string_util;
///
/// #[static_string_util]
/// pub struct User {
///     name: String,
///     email: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn static_string_util(attr: TokenStream, item: TokenStream) -> TokenStream {
    match marker::expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

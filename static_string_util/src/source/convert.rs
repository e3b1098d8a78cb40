//! Conversion of `syn` items into [`Declaration`] descriptors.

use camino::Utf8Path;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{
    Attribute, Fields, GenericParam, Generics, Ident, Item, ItemEnum, ItemStruct, ItemTrait,
    ItemUnion, TraitItem,
};

use super::CfgSet;
use crate::declaration::{Anchor, Declaration, DeclarationKind, Member, MemberKind, Package, Visibility};

/// Converts a type item; returns `None` for every other kind of item and for
/// items compiled out by `#[cfg(..)]`.
pub(super) fn declaration(
    item: &Item,
    package: &Package,
    file: &Utf8Path,
    cfg: &CfgSet,
) -> Option<Declaration> {
    let (parts, kind, members) = match item {
        Item::Struct(strukt) => (
            parts_of_struct(strukt),
            DeclarationKind::Struct,
            struct_members(strukt, cfg),
        ),
        Item::Enum(enumeration) => (
            parts_of_enum(enumeration),
            DeclarationKind::Enum,
            enum_members(enumeration, cfg),
        ),
        Item::Union(union_item) => (
            parts_of_union(union_item),
            DeclarationKind::Union,
            union_members(union_item, cfg),
        ),
        Item::Trait(trait_item) => (
            parts_of_trait(trait_item),
            DeclarationKind::Trait,
            trait_members(trait_item),
        ),
        _ => return None,
    };
    let (ident, vis, attrs, generics) = parts;
    if !cfg.is_enabled(attrs) {
        return None;
    }
    let simple_name = ident.to_string();

    Some(Declaration {
        qualified_name: package.qualify(&simple_name),
        simple_name,
        package: package.clone(),
        visibility: visibility(vis),
        kind,
        attributes: attribute_names(attrs),
        generics: generic_names(generics),
        members,
        anchor: Some(Anchor {
            file: file.to_path_buf(),
            line: ident.span().start().line,
        }),
    })
}

type Parts<'a> = (&'a Ident, &'a syn::Visibility, &'a [Attribute], &'a Generics);

fn parts_of_struct(item: &ItemStruct) -> Parts<'_> {
    (&item.ident, &item.vis, item.attrs.as_slice(), &item.generics)
}

fn parts_of_enum(item: &ItemEnum) -> Parts<'_> {
    (&item.ident, &item.vis, item.attrs.as_slice(), &item.generics)
}

fn parts_of_union(item: &ItemUnion) -> Parts<'_> {
    (&item.ident, &item.vis, item.attrs.as_slice(), &item.generics)
}

fn parts_of_trait(item: &ItemTrait) -> Parts<'_> {
    (&item.ident, &item.vis, item.attrs.as_slice(), &item.generics)
}

fn visibility(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Restricted(restricted) => {
            let scope = restricted.path.to_token_stream().to_string();
            if restricted.in_token.is_some() {
                Visibility::Restricted(format!("in {scope}"))
            } else {
                Visibility::Restricted(scope)
            }
        }
        syn::Visibility::Inherited => Visibility::Private,
    }
}

fn attribute_names(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter_map(|attr| attr.path().segments.last())
        .map(|segment| segment.ident.unraw().to_string())
        .collect()
}

fn generic_names(generics: &Generics) -> Vec<String> {
    generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Type(ty) => ty.ident.to_string(),
            GenericParam::Lifetime(lifetime) => lifetime.lifetime.to_string(),
            GenericParam::Const(constant) => constant.ident.to_string(),
        })
        .collect()
}

/// Tuple indices count only the fields left after `cfg` filtering.
fn struct_members(item: &ItemStruct, cfg: &CfgSet) -> Vec<Member> {
    match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter(|field| cfg.is_enabled(&field.attrs))
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| Member::new(ident.unraw().to_string(), MemberKind::Field))
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .filter(|field| cfg.is_enabled(&field.attrs))
            .enumerate()
            .map(|(index, _)| Member::new(index.to_string(), MemberKind::Field))
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

fn enum_members(item: &ItemEnum, cfg: &CfgSet) -> Vec<Member> {
    item.variants
        .iter()
        .filter(|variant| cfg.is_enabled(&variant.attrs))
        .map(|variant| Member::new(variant.ident.unraw().to_string(), MemberKind::Variant))
        .collect()
}

fn union_members(item: &ItemUnion, cfg: &CfgSet) -> Vec<Member> {
    item.fields
        .named
        .iter()
        .filter(|field| cfg.is_enabled(&field.attrs))
        .filter_map(|field| field.ident.as_ref())
        .map(|ident| Member::new(ident.unraw().to_string(), MemberKind::UnionField))
        .collect()
}

fn trait_members(item: &ItemTrait) -> Vec<Member> {
    item.items
        .iter()
        .filter_map(|trait_item| match trait_item {
            TraitItem::Fn(method) => Some(Member::new(
                method.sig.ident.unraw().to_string(),
                MemberKind::Method,
            )),
            TraitItem::Const(constant) => Some(Member::new(
                constant.ident.unraw().to_string(),
                MemberKind::AssociatedConst,
            )),
            TraitItem::Type(ty) => Some(Member::new(
                ty.ident.unraw().to_string(),
                MemberKind::AssociatedType,
            )),
            _ => None,
        })
        .collect()
}

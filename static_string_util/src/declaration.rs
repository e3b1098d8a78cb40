//! Descriptors of the type declarations visible to a discovery pass.
//!
//! A [`Declaration`] is an immutable snapshot of one `struct`, `enum`,
//! `union` or `trait` item. The pipeline never looks at `syn` trees directly;
//! the source front-end converts them into these values once per pass.

use std::fmt;

use camino::Utf8PathBuf;

/// Module path that owns a declaration.
///
/// The crate root has no segments and is the unnamed package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Package {
    segments: Vec<String>,
}

impl Package {
    /// Builds a package from its module path segments, outermost first.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the crate root package.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns `true` for the crate root, which has no name.
    #[must_use]
    pub const fn is_unnamed(&self) -> bool {
        self.segments.is_empty()
    }

    /// Module path segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the package of a module nested directly inside this one.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_owned());
        Self { segments }
    }

    /// Qualifies `ident` with this package's path.
    #[must_use]
    pub fn qualify(&self, ident: &str) -> String {
        if self.is_unnamed() {
            ident.to_owned()
        } else {
            format!("{self}::{ident}")
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// Visibility of a declaration as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// `pub` without restriction.
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(self)` or `pub(in path)`.
    Restricted(String),
    /// No visibility keyword.
    Private,
}

impl Visibility {
    /// Only unrestricted `pub` counts as publicly visible.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// The kind of type item a declaration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// A `struct` item.
    Struct,
    /// An `enum` item.
    Enum,
    /// A `union` item.
    Union,
    /// A `trait` item.
    Trait,
}

impl DeclarationKind {
    /// Traits cannot be instantiated, so they play the abstract role.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Trait)
    }
}

/// What a member of a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A named or positional struct field.
    Field,
    /// A field of a `union`; its storage overlaps the other fields.
    UnionField,
    /// An enum variant.
    Variant,
    /// A trait method.
    Method,
    /// A trait associated constant.
    AssociatedConst,
    /// A trait associated type.
    AssociatedType,
}

/// One member of a declaration, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name with any `r#` prefix removed, or the index of a tuple field.
    pub name: String,
    /// Kind of member.
    pub kind: MemberKind,
}

impl Member {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Source location a diagnostic can point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Path of the source file.
    pub file: Utf8PathBuf,
    /// One-based line of the declaration's identifier.
    pub line: usize,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A type declaration visible in the current pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `package::Ident`, or just `Ident` at the crate root.
    pub qualified_name: String,
    /// The item's identifier.
    pub simple_name: String,
    /// Module that owns the item.
    pub package: Package,
    /// Visibility as written.
    pub visibility: Visibility,
    /// Item kind.
    pub kind: DeclarationKind,
    /// Last path segment of every outer attribute, in source order.
    pub attributes: Vec<String>,
    /// Names of generic type, lifetime and const parameters.
    pub generics: Vec<String>,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Where the item was declared, when known.
    pub anchor: Option<Anchor>,
}

impl Declaration {
    /// Starts a public struct declaration with no members.
    ///
    /// Mostly useful for tests and for hosts that build descriptors by hand;
    /// the remaining fields are filled in with the `with_*` methods.
    pub fn new(package: Package, simple_name: impl Into<String>) -> Self {
        let simple_name = simple_name.into();
        Self {
            qualified_name: package.qualify(&simple_name),
            simple_name,
            package,
            visibility: Visibility::Public,
            kind: DeclarationKind::Struct,
            attributes: Vec::new(),
            generics: Vec::new(),
            members: Vec::new(),
            anchor: None,
        }
    }

    /// Adds an attribute name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Replaces the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Replaces the item kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: DeclarationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a struct field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.members.push(Member::new(name, MemberKind::Field));
        self
    }

    /// Appends a member of any kind.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a generic parameter name.
    #[must_use]
    pub fn with_generic(mut self, name: impl Into<String>) -> Self {
        self.generics.push(name.into());
        self
    }

    /// Sets the source anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Returns `true` when an attribute named `name` is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute == name)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for package and declaration helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::root(Package::root(), "User", "User")]
    #[case::single(Package::new(["model"]), "User", "model::User")]
    #[case::nested(Package::new(["model", "account"]), "User", "model::account::User")]
    fn qualifies_names(#[case] package: Package, #[case] ident: &str, #[case] expected: &str) {
        assert_eq!(package.qualify(ident), expected);
    }

    #[rstest]
    fn root_package_is_unnamed() {
        assert!(Package::root().is_unnamed());
        assert!(!Package::root().child("model").is_unnamed());
    }

    #[rstest]
    #[case::public(Visibility::Public, true)]
    #[case::crate_only(Visibility::Restricted("crate".to_owned()), false)]
    #[case::private(Visibility::Private, false)]
    fn only_plain_pub_is_public(#[case] visibility: Visibility, #[case] expected: bool) {
        assert_eq!(visibility.is_public(), expected);
    }

    #[rstest]
    fn new_declaration_is_qualified_by_package() {
        let declaration = Declaration::new(Package::new(["model"]), "User");
        assert_eq!(declaration.qualified_name, "model::User");
        assert_eq!(declaration.kind, DeclarationKind::Struct);
        assert!(declaration.visibility.is_public());
    }
}

//! The per-pass batch of validated, field-extracted descriptors.

use crate::declaration::{Anchor, Declaration, Package};
use crate::error::ProcessError;
use crate::extractor::extract_fields;

/// A validated declaration together with its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedDeclaration {
    /// `package::Ident`.
    pub qualified_name: String,
    /// The identifier, without any `r#` prefix.
    pub simple_name: String,
    /// Owning module.
    pub package: Package,
    /// Direct data members in declaration order.
    pub fields: Vec<String>,
    /// Source location, when known.
    pub anchor: Option<Anchor>,
}

/// Builds the descriptor of an accepted declaration.
///
/// # Errors
///
/// Returns [`ProcessError::GenericParameters`] for generic declarations,
/// which the generator does not handle.
pub fn describe(declaration: &Declaration) -> Result<MarkedDeclaration, ProcessError> {
    if !declaration.generics.is_empty() {
        return Err(ProcessError::GenericParameters);
    }
    Ok(MarkedDeclaration {
        qualified_name: declaration.qualified_name.clone(),
        simple_name: declaration
            .simple_name
            .strip_prefix("r#")
            .unwrap_or(&declaration.simple_name)
            .to_owned(),
        package: declaration.package.clone(),
        fields: extract_fields(declaration),
        anchor: declaration.anchor.clone(),
    })
}

/// Ordered descriptors collected during one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    declarations: Vec<MarkedDeclaration>,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Appends a descriptor.
    pub fn push(&mut self, declaration: MarkedDeclaration) {
        self.declarations.push(declaration);
    }

    /// Returns `true` when nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of descriptors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.declarations.len()
    }

    /// The first descriptor; its package decides where output is placed.
    #[must_use]
    pub fn anchor(&self) -> Option<&MarkedDeclaration> {
        self.declarations.first()
    }

    /// Descriptors in discovery order.
    #[must_use]
    pub fn declarations(&self) -> &[MarkedDeclaration] {
        &self.declarations
    }

    /// Iterates descriptors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, MarkedDeclaration> {
        self.declarations.iter()
    }
}

impl FromIterator<MarkedDeclaration> for Batch {
    fn from_iter<I: IntoIterator<Item = MarkedDeclaration>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a MarkedDeclaration;
    type IntoIter = std::slice::Iter<'a, MarkedDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

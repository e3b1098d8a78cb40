//! Synthesis of the generated unit.
//!
//! [`generate`] turns a non-empty [`Batch`] into a [`GeneratedUnit`]: one
//! aggregator type placed in the package of the batch's first declaration,
//! with one `create_string` function per declaration in batch order. The unit
//! is plain data; [`render`] turns it into formatted Rust source.

mod render;

use camino::Utf8PathBuf;

pub use render::{GENERATED_HEADER, format_template, render};

use crate::batch::{Batch, MarkedDeclaration};
use crate::config::{FieldRendering, GeneratorConfig};
use crate::declaration::Package;
use crate::error::GenerateError;

/// One generated `create_string` function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// Qualified name of the declaration the function stringifies.
    pub declaration: String,
    /// Absolute path of the parameter type, e.g. `crate::model::User`.
    pub type_path: String,
    /// Name written before the opening brace.
    pub simple_name: String,
    /// Field accessors in declaration order.
    pub fields: Vec<String>,
}

/// The aggregate output of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Identifier of the aggregator type.
    pub type_name: String,
    /// Module the unit belongs in.
    pub package: Package,
    /// Functions in batch order.
    pub functions: Vec<GeneratedFunction>,
    /// Text conversion applied to field values.
    pub field_rendering: FieldRendering,
    /// Path through which generated code reaches `CreateString`.
    pub runtime_crate: String,
    /// File name of the unit inside its package directory.
    pub file_name: String,
}

impl GeneratedUnit {
    /// Location of the unit relative to the output directory.
    ///
    /// Package segments become directories, so `model::account` with the
    /// default type name maps to `model/account/string_util.rs`.
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        let mut path: Utf8PathBuf = self
            .package
            .segments()
            .iter()
            .map(|segment| segment.strip_prefix("r#").unwrap_or(segment))
            .collect();
        path.push(&self.file_name);
        path
    }
}

/// Builds the generated unit for a batch.
///
/// The package of the first declaration decides where the unit goes; the
/// packages of later declarations are not consulted. Every function refers to
/// its type through `crate::<qualified name>`, so a batch spanning several
/// modules still compiles from the anchor's module.
///
/// # Errors
///
/// - [`GenerateError::EmptyBatch`] when the batch has no declarations.
/// - [`GenerateError::MissingPackage`] when the first declaration lives in
///   the crate root.
/// - [`GenerateError::InvalidOutput`] when a type or field name cannot be
///   expressed as Rust tokens.
pub fn generate(batch: &Batch, config: &GeneratorConfig) -> Result<GeneratedUnit, GenerateError> {
    let anchor = batch.anchor().ok_or(GenerateError::EmptyBatch)?;
    if anchor.package.is_unnamed() {
        return Err(GenerateError::MissingPackage {
            declaration: anchor.qualified_name.clone(),
        });
    }
    if batch.iter().any(|declaration| declaration.package != anchor.package) {
        tracing::debug!(
            package = %anchor.package,
            "batch spans several packages; output follows the first declaration"
        );
    }

    let functions = batch
        .iter()
        .map(generate_function)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedUnit {
        type_name: config.type_name.clone(),
        package: anchor.package.clone(),
        functions,
        field_rendering: config.field_rendering,
        runtime_crate: config.runtime_crate.clone(),
        file_name: config.file_name(),
    })
}

fn generate_function(declaration: &MarkedDeclaration) -> Result<GeneratedFunction, GenerateError> {
    let type_path = format!("crate::{}", declaration.qualified_name);
    if syn::parse_str::<syn::Path>(&type_path).is_err() {
        return Err(invalid(declaration, format!("`{type_path}` is not a type path")));
    }
    if let Some(field) = declaration
        .fields
        .iter()
        .find(|field| render::member(field).is_none())
    {
        return Err(invalid(declaration, format!("`{field}` is not a field name")));
    }

    Ok(GeneratedFunction {
        declaration: declaration.qualified_name.clone(),
        type_path,
        simple_name: declaration.simple_name.clone(),
        fields: declaration.fields.clone(),
    })
}

fn invalid(declaration: &MarkedDeclaration, message: String) -> GenerateError {
    GenerateError::InvalidOutput {
        declaration: declaration.qualified_name.clone(),
        message,
    }
}

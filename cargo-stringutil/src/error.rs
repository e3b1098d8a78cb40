//! Error types for `cargo-stringutil`.

use static_string_util::StringUtilError;
use thiserror::Error;

/// Errors surfaced by the `cargo-stringutil` pipeline.
#[derive(Debug, Error)]
pub enum CargoStringutilError {
    /// `cargo metadata` could not be run or parsed.
    #[error("cargo metadata failed: {0}")]
    Metadata(#[from] cargo_metadata::Error),

    /// `[package.metadata.static_string_util]` does not describe a valid configuration.
    #[error("invalid package.metadata.static_string_util in '{package}': {source}")]
    ManifestConfig {
        /// Package whose manifest holds the table.
        package: String,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// `--package` named a package outside the workspace.
    #[error("package '{0}' not found in workspace")]
    PackageNotFound(String),

    /// No package was named and the workspace has no root package.
    #[error("workspace root package was not available; pass --package")]
    WorkspaceRootMissing,

    /// The package has neither a library nor a binary target.
    #[error("package '{0}' has no lib or bin target to scan")]
    MissingEntryTarget(String),

    /// The generator itself failed or reported diagnostics.
    #[error(transparent)]
    Generator(#[from] StringUtilError),
}

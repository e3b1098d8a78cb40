//! Error types for `static_string_util`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Generation of a batch failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Generation was requested for a batch with no declarations.
    #[error("nothing to generate")]
    EmptyBatch,

    /// The first declaration of the batch lives in the crate root.
    #[error("the package of {declaration} has no name")]
    MissingPackage {
        /// Qualified name of the anchor declaration.
        declaration: String,
    },

    /// A name in the batch or configuration could not be turned into tokens.
    #[error("invalid generated code for {declaration}: {message}")]
    InvalidOutput {
        /// Declaration whose function could not be built.
        declaration: String,
        /// Parser message.
        message: String,
    },
}

/// An accepted declaration could not be turned into a descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The declaration has type, lifetime or const parameters.
    #[error("generic parameters are not supported")]
    GenericParameters,
}

/// Writing a generated unit failed.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The unit could not be rendered as Rust source.
    #[error("failed to render generated source: {0}")]
    Render(String),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Reading declarations from a crate's sources failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Neither `src/lib.rs` nor `src/main.rs` exists.
    #[error("no crate entry point found under {0}")]
    MissingEntry(Utf8PathBuf),

    /// A source file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("failed to parse {path}:{line}: {message}")]
    Parse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// One-based line of the error.
        line: usize,
        /// Parser message.
        message: String,
    },
}

/// Configuration values that cannot be used in generated code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The marker is not an identifier.
    #[error("marker '{0}' is not a valid attribute name")]
    InvalidMarker(String),

    /// The aggregator type name is not an identifier.
    #[error("type name '{0}' is not a valid Rust identifier")]
    InvalidTypeName(String),

    /// The runtime crate is not a path.
    #[error("runtime crate '{0}' is not a valid Rust path")]
    InvalidRuntimeCrate(String),
}

/// Errors surfaced by a generation round.
#[derive(Debug, Error)]
pub enum StringUtilError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Declaration discovery failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The generated unit could not be written.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// A build-script environment variable is missing.
    #[error("environment variable {0} is not set; run from a Cargo build script")]
    Env(&'static str),

    /// The round reported error diagnostics.
    #[error("static_string_util reported {count} error(s)")]
    Diagnostics {
        /// Number of diagnostics reported.
        count: usize,
    },
}

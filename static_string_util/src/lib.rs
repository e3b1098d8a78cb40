//! Build-time generation of field-by-field string helpers.
//!
//! Mark a public type with [`macro@static_string_util`] and run
//! [`build::generate`] from the crate's build script. Each pass scans the
//! crate's sources, validates the marked declarations, extracts their fields
//! in declaration order and writes one unit holding a `StringUtil` type that
//! implements [`CreateString`] for every marked type:
//!
//! ```rust,ignore
//! use static_string_util::{CreateString, static_string_util};
//!
//! #[static_string_util]
//! pub struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/model/string_util.rs"));
//!
//! // "User{name='Alice',email='a@b.com',}"
//! let text = StringUtil::create_string(&user);
//! ```
//!
//! The pipeline itself ([`run_pass`]) is a pure function over
//! [`Declaration`] descriptors, so hosts other than Cargo build scripts can
//! drive it with their own [`DeclarationSource`], [`DiagnosticSink`] and
//! [`Emitter`].

pub mod batch;
pub mod build;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod pass;
pub mod scanner;
pub mod source;
pub mod validator;

pub use static_string_util_macros::static_string_util;

pub use batch::{Batch, MarkedDeclaration};
pub use config::{FieldRendering, GeneratorConfig, Marker};
pub use declaration::{Declaration, Package};
pub use diagnostic::{Diagnostic, DiagnosticSink};
pub use emit::{EmittedUnit, Emitter, FsEmitter, MemoryEmitter};
pub use error::{ConfigError, EmitError, GenerateError, ProcessError, SourceError, StringUtilError};
pub use generator::{GeneratedUnit, generate};
pub use pass::{PassOutcome, Round, RoundReport, run_pass};
pub use source::{CfgSet, CrateSource, DeclarationSource};

/// Text rendering of a marked type, implemented by the generated aggregator.
///
/// `T` is the marked type. One aggregator implements the trait once per
/// type, so `StringUtil::create_string(&value)` picks the implementation
/// from the argument.
pub trait CreateString<T: ?Sized> {
    /// Renders `instance` as `Name{field='value',...}`.
    fn create_string(instance: &T) -> String;
}

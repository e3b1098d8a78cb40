//! Command-line interface definitions for `cargo-stringutil`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, ValueEnum};
use static_string_util::FieldRendering;

/// Name Cargo passes as the first argument when run as `cargo stringutil`.
pub const SUBCOMMAND: &str = "stringutil";

/// Field rendering choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderingArg {
    /// Format field values with `Display`.
    Display,
    /// Format field values with `Debug`.
    Debug,
}

impl From<RenderingArg> for FieldRendering {
    fn from(value: RenderingArg) -> Self {
        match value {
            RenderingArg::Display => Self::Display,
            RenderingArg::Debug => Self::Debug,
        }
    }
}

/// Parsed CLI arguments for `cargo-stringutil`.
#[derive(Debug, Parser)]
#[command(name = "cargo-stringutil", bin_name = "cargo stringutil")]
#[command(about = "Generate StringUtil helpers for types marked with #[static_string_util]")]
#[command(version)]
pub struct Args {
    /// Cargo package to scan.
    #[arg(long)]
    pub package: Option<String>,
    /// Output directory for generated units.
    #[arg(long, value_name = "path")]
    pub out_dir: Option<Utf8PathBuf>,
    /// Cargo features to treat as enabled when evaluating `#[cfg(feature = ..)]`.
    #[arg(long, value_name = "features", value_delimiter = ',')]
    pub features: Vec<String>,
    /// Generator settings overriding package metadata.
    #[command(flatten)]
    pub generator: GeneratorArgs,
    /// Validate and generate without writing files.
    #[arg(long = "check")]
    pub is_check: bool,
    /// Log progress at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Generator settings that may be given on the command line.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct GeneratorArgs {
    /// Attribute name that marks declarations.
    #[arg(long, value_name = "name")]
    pub marker: Option<String>,
    /// Name of the generated aggregator type.
    #[arg(long, value_name = "Ident")]
    pub type_name: Option<String>,
    /// How field values are formatted.
    #[arg(long, value_enum)]
    pub field_rendering: Option<RenderingArg>,
    /// Path through which generated code reaches `CreateString`.
    #[arg(long, value_name = "path")]
    pub runtime_crate: Option<String>,
}

/// Drops the subcommand name Cargo inserts after the binary name.
pub fn strip_subcommand<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == SUBCOMMAND) {
        args.remove(1);
    }
    args
}

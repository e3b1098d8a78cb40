//! Library interface for `cargo stringutil`.
//!
//! The subcommand runs the same round a build script would, but against a
//! package picked through `cargo metadata` and with settings layered from the
//! command line over `[package.metadata.static_string_util]`. Generated units
//! go to `<target>/stringutil/out` unless `--out-dir` says otherwise, and
//! `--check` validates without writing anything.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod sink;

use camino::Utf8PathBuf;
use static_string_util::{
    CfgSet, CrateSource, FsEmitter, MemoryEmitter, Round, RoundReport, StringUtilError,
};

use crate::cli::Args;
use crate::error::CargoStringutilError;
use crate::metadata::PackageSelection;
use crate::sink::StreamSink;

/// Runs one generation round for the selected package.
///
/// Diagnostics are written to stderr as they are produced.
///
/// # Errors
///
/// Returns [`CargoStringutilError`] when the package cannot be resolved, the
/// round fails, or any diagnostic was reported.
pub fn run(args: &Args) -> Result<RoundReport, CargoStringutilError> {
    let metadata = metadata::load_metadata()?;
    let selection = metadata::select_package(&metadata, args.package.as_deref())?;
    let config = config::resolve(selection.defaults.clone(), &args.generator);
    tracing::debug!(
        package = %selection.package_name,
        entry = %selection.entry,
        type_name = %config.type_name,
        "resolved generator settings"
    );

    let source = CrateSource::new(&selection.entry)
        .map_err(StringUtilError::from)?
        .with_cfg(active_cfg(&args.features));
    let mut sink = StreamSink::stderr();
    let report = if args.is_check {
        let mut emitter = MemoryEmitter::new();
        Round::new(&config, &source, &mut sink, &mut emitter).run()?
    } else {
        let mut emitter = FsEmitter::new(resolve_out_dir(args.out_dir.clone(), &selection));
        Round::new(&config, &source, &mut sink, &mut emitter).run()?
    };

    if sink.reported() > 0 {
        return Err(StringUtilError::Diagnostics {
            count: sink.reported(),
        }
        .into());
    }
    Ok(report)
}

/// Host configuration plus the features named on the command line.
fn active_cfg(features: &[String]) -> CfgSet {
    features
        .iter()
        .fold(CfgSet::host(), |cfg, feature| cfg.with_feature(feature))
}

fn resolve_out_dir(out_dir: Option<Utf8PathBuf>, selection: &PackageSelection) -> Utf8PathBuf {
    out_dir.unwrap_or_else(|| selection.target_directory.join("stringutil").join("out"))
}

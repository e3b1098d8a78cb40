//! Build-script entry points.
//!
//! Call [`generate`] from a `build.rs` to write the unit into `OUT_DIR`, then
//! `include!` it from the module that owns the marked types:
//!
//! ```rust,ignore
//! // build.rs
//! fn main() -> Result<(), static_string_util::StringUtilError> {
//!     static_string_util::build::generate().map(|_| ())
//! }
//!
//! // src/model.rs
//! include!(concat!(env!("OUT_DIR"), "/model/string_util.rs"));
//! ```

use std::io::Write;

use camino::Utf8PathBuf;

use crate::config::GeneratorConfig;
use crate::diagnostic::CargoSink;
use crate::emit::FsEmitter;
use crate::error::StringUtilError;
use crate::pass::{Round, RoundReport};
use crate::source::CrateSource;

/// Runs one round with the default configuration.
///
/// # Errors
///
/// See [`generate_with`].
pub fn generate() -> Result<RoundReport, StringUtilError> {
    generate_with(&GeneratorConfig::default())
}

/// Runs one round for the package being built.
///
/// Sources are read from `$CARGO_MANIFEST_DIR/src` and the unit is written
/// below `$OUT_DIR`. Diagnostics are printed as `cargo:warning` lines and
/// any diagnostic fails the build.
///
/// # Errors
///
/// Returns [`StringUtilError::Env`] outside a build script,
/// [`StringUtilError::Diagnostics`] when the round reported problems, and
/// the round's own errors otherwise.
pub fn generate_with(config: &GeneratorConfig) -> Result<RoundReport, StringUtilError> {
    let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;

    let source = CrateSource::discover(&manifest_dir)?;
    // Failing to print the hint only costs extra rebuilds.
    let _ignored = writeln!(
        std::io::stdout().lock(),
        "cargo:rerun-if-changed={}",
        source.src_dir()
    );

    let mut sink = CargoSink::default();
    let mut emitter = FsEmitter::new(out_dir);
    let report = Round::new(config, &source, &mut sink, &mut emitter).run()?;
    if sink.reported() > 0 {
        return Err(StringUtilError::Diagnostics {
            count: sink.reported(),
        });
    }
    Ok(report)
}

fn env_path(name: &'static str) -> Result<Utf8PathBuf, StringUtilError> {
    std::env::var(name)
        .map(Utf8PathBuf::from)
        .map_err(|_| StringUtilError::Env(name))
}

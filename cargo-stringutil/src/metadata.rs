//! Cargo metadata discovery for `cargo-stringutil`.

use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::{Metadata, MetadataCommand, Package};
use static_string_util::GeneratorConfig;

use crate::error::CargoStringutilError;

/// Key of the package metadata table holding generator defaults.
pub const METADATA_KEY: &str = "static_string_util";

/// Target kinds whose root file is a library crate root.
const LIBRARY_KINDS: [&str; 6] = ["lib", "rlib", "dylib", "cdylib", "staticlib", "proc-macro"];

/// The package to scan and the inputs derived from its manifest.
#[derive(Debug, Clone)]
pub struct PackageSelection {
    /// Selected Cargo package name.
    pub package_name: String,
    /// Cargo target directory for build artefacts.
    pub target_directory: Utf8PathBuf,
    /// Crate root file the module walk starts from.
    pub entry: Utf8PathBuf,
    /// Generator settings from the manifest, over the library defaults.
    pub defaults: GeneratorConfig,
}

/// Loads Cargo metadata for the current workspace.
///
/// # Errors
///
/// Returns [`CargoStringutilError::Metadata`] when `cargo metadata` fails.
pub fn load_metadata() -> Result<Metadata, CargoStringutilError> {
    let mut command = MetadataCommand::new();
    command.no_deps();
    Ok(command.exec()?)
}

/// Selects the package to scan and reads its generator defaults.
///
/// # Errors
///
/// Returns [`CargoStringutilError`] when the package cannot be found, has no
/// scannable target, or carries an invalid metadata table.
pub fn select_package(
    metadata: &Metadata,
    name: Option<&str>,
) -> Result<PackageSelection, CargoStringutilError> {
    let package = match name {
        Some(requested) => find_package(metadata, requested)?,
        None => metadata
            .root_package()
            .ok_or(CargoStringutilError::WorkspaceRootMissing)?,
    };

    let entry = select_entry(
        package
            .targets
            .iter()
            .map(|target| (target.kind.as_slice(), target.src_path.as_path())),
    )
    .map(Utf8Path::to_path_buf)
    .ok_or_else(|| CargoStringutilError::MissingEntryTarget(package.name.clone()))?;
    let defaults = parse_defaults(package.metadata.get(METADATA_KEY)).map_err(|source| {
        CargoStringutilError::ManifestConfig {
            package: package.name.clone(),
            source,
        }
    })?;

    Ok(PackageSelection {
        package_name: package.name.clone(),
        target_directory: metadata.target_directory.clone(),
        entry,
        defaults,
    })
}

fn find_package<'a>(metadata: &'a Metadata, name: &str) -> Result<&'a Package, CargoStringutilError> {
    metadata
        .packages
        .iter()
        .find(|package| package.name == name)
        .ok_or_else(|| CargoStringutilError::PackageNotFound(name.to_owned()))
}

/// Picks the library root if there is one, else the first binary root.
fn select_entry<'a, I>(targets: I) -> Option<&'a Utf8Path>
where
    I: IntoIterator<Item = (&'a [String], &'a Utf8Path)>,
{
    let mut first_bin = None;
    for (kinds, src_path) in targets {
        if kinds.iter().any(|kind| LIBRARY_KINDS.contains(&kind.as_str())) {
            return Some(src_path);
        }
        if first_bin.is_none() && kinds.iter().any(|kind| kind == "bin") {
            first_bin = Some(src_path);
        }
    }
    first_bin
}

fn parse_defaults(value: Option<&serde_json::Value>) -> Result<GeneratorConfig, serde_json::Error> {
    value.map_or_else(
        || Ok(GeneratorConfig::default()),
        |table| serde_json::from_value(table.clone()),
    )
}

//! Filesystem emitter using `cap_std` for directory access.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use super::{EmittedUnit, Emitter};
use crate::error::EmitError;
use crate::generator::{GeneratedUnit, render};

/// Writes units to `<out_dir>/<package dirs>/<file name>`.
///
/// Content goes to a hidden temporary sibling first and is renamed into
/// place, so a failed write never leaves a truncated unit behind.
#[derive(Debug, Clone)]
pub struct FsEmitter {
    out_dir: Utf8PathBuf,
}

impl FsEmitter {
    /// Creates an emitter rooted at `out_dir`; the directory is created on
    /// first use.
    pub fn new(out_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Root output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Utf8Path {
        &self.out_dir
    }
}

impl Emitter for FsEmitter {
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<EmittedUnit, EmitError> {
        let source = render(unit)?;
        let relative = unit.relative_path();
        let file_path = self.out_dir.join(&relative);

        let root = ensure_dir(&self.out_dir)?;
        let package_dir = match relative.parent().filter(|parent| !parent.as_str().is_empty()) {
            Some(parent) => {
                let parent_path = self.out_dir.join(parent);
                root.create_dir_all(parent).map_err(|io_err| EmitError::Io {
                    path: parent_path.clone(),
                    source: io_err,
                })?;
                root.open_dir(parent).map_err(|io_err| EmitError::Io {
                    path: parent_path,
                    source: io_err,
                })?
            }
            None => root,
        };

        let temp_name = format!(".{}.tmp", unit.file_name);
        let temp_path = file_path.with_file_name(&temp_name);
        if let Err(err) = write_file(&package_dir, &temp_name, &temp_path, &source) {
            // The temporary file is never read; a leftover one is harmless.
            let _removed = package_dir.remove_file(&temp_name);
            return Err(err);
        }
        package_dir
            .rename(&temp_name, &package_dir, &unit.file_name)
            .map_err(|io_err| EmitError::Io {
                path: file_path.clone(),
                source: io_err,
            })?;

        tracing::info!(path = %file_path, functions = unit.functions.len(), "wrote generated unit");
        Ok(EmittedUnit {
            path: file_path,
            functions: unit.functions.len(),
        })
    }
}

fn write_file(dir: &Dir, name: &str, path: &Utf8Path, content: &str) -> Result<(), EmitError> {
    let mut file = dir
        .open_with(
            name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| EmitError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|io_err| EmitError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, EmitError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| {
                EmitError::Io {
                    path: path.to_path_buf(),
                    source: io_err,
                }
            })?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| EmitError::Io {
                path: path.to_path_buf(),
                source: io_err,
            })
        }
        Err(open_err) => Err(EmitError::Io {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the filesystem emitter.

    use super::*;
    use crate::config::FieldRendering;
    use crate::declaration::Package;
    use crate::generator::{GENERATED_HEADER, GeneratedFunction};
    use anyhow::{Context, Result, ensure};
    use rstest::rstest;

    fn unit(package: Package) -> GeneratedUnit {
        GeneratedUnit {
            type_name: "StringUtil".to_owned(),
            package,
            functions: vec![GeneratedFunction {
                declaration: "model::User".to_owned(),
                type_path: "crate::model::User".to_owned(),
                simple_name: "User".to_owned(),
                fields: vec!["name".to_owned()],
            }],
            field_rendering: FieldRendering::Display,
            runtime_crate: "static_string_util".to_owned(),
            file_name: "string_util.rs".to_owned(),
        }
    }

    fn utf8(dir: &tempfile::TempDir) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir: {}", path.display()))
    }

    #[rstest]
    fn writes_into_package_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let out_dir = utf8(&temp)?.join("out");
        let mut emitter = FsEmitter::new(out_dir.clone());

        let emitted = emitter.emit(&unit(Package::new(["model", "account"])))?;
        ensure!(
            emitted.path == out_dir.join("model/account/string_util.rs"),
            "unexpected path {}",
            emitted.path
        );
        let written = std::fs::read_to_string(&emitted.path).context("read unit")?;
        ensure!(written.starts_with(GENERATED_HEADER), "header missing");
        ensure!(
            !out_dir.join("model/account/.string_util.rs.tmp").exists(),
            "temporary file must be renamed away"
        );
        Ok(())
    }

    #[rstest]
    fn rewriting_replaces_content() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let out_dir = utf8(&temp)?;
        let mut emitter = FsEmitter::new(out_dir.clone());

        let first = emitter.emit(&unit(Package::new(["model"])))?;
        let mut second_unit = unit(Package::new(["model"]));
        second_unit.functions.clear();
        let second = emitter.emit(&second_unit)?;
        ensure!(first.path == second.path, "same unit path expected");
        let written = std::fs::read_to_string(&second.path).context("read unit")?;
        ensure!(!written.contains("crate::model::User"), "stale content: {written}");
        Ok(())
    }

    #[rstest]
    fn unwritable_root_is_an_io_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let blocker = utf8(&temp)?.join("blocker");
        std::fs::write(&blocker, "not a directory")?;
        let mut emitter = FsEmitter::new(blocker.join("out"));
        let result = emitter.emit(&unit(Package::new(["model"])));
        ensure!(matches!(result, Err(EmitError::Io { .. })), "expected I/O error");
        Ok(())
    }
}

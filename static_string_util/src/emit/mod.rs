//! Emission of generated units.
//!
//! The [`Emitter`] trait is the boundary to whatever stores generated code.
//! [`FsEmitter`] writes files below an output directory (a build script's
//! `OUT_DIR` or the CLI's `--out-dir`); [`MemoryEmitter`] keeps the rendered
//! text, for dry runs and tests.

mod fs;

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

pub use fs::FsEmitter;

use crate::error::EmitError;
use crate::generator::{GeneratedUnit, render};

/// Summary of a unit that was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    /// Where the unit was written.
    pub path: Utf8PathBuf,
    /// Number of functions it contains.
    pub functions: usize,
}

/// Writes generated units.
pub trait Emitter {
    /// Serializes and stores `unit`, replacing any unit previously stored at
    /// the same location.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError`] when rendering or storage fails.
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<EmittedUnit, EmitError>;
}

/// Keeps rendered units in memory, keyed by their relative path.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    units: BTreeMap<Utf8PathBuf, String>,
}

impl MemoryEmitter {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered source stored at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Utf8Path) -> Option<&str> {
        self.units.get(path).map(String::as_str)
    }

    /// Number of stored units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` when nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<EmittedUnit, EmitError> {
        let source = render(unit)?;
        let path = unit.relative_path();
        self.units.insert(path.clone(), source);
        Ok(EmittedUnit {
            path,
            functions: unit.functions.len(),
        })
    }
}

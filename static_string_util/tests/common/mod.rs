//! Shared helpers for `static_string_util` integration tests.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// A throwaway crate layout on disk.
pub struct CrateTree {
    _temp: tempfile::TempDir,
    /// Package directory, holding `src/`.
    pub root: Utf8PathBuf,
}

impl CrateTree {
    /// Writes `files` (paths relative to the package directory).
    pub fn new(files: &[(&str, &str)]) -> Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("non UTF-8 temp dir: {}", path.display()))?;
        for (path, content) in files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full, content)?;
        }
        Ok(Self { _temp: temp, root })
    }

    /// Output directory inside the tree.
    pub fn out_dir(&self) -> Utf8PathBuf {
        self.root.join("target/out")
    }
}

//! Declaration discovery from a crate's source tree.
//!
//! [`CrateSource`] parses the crate entry file with `syn` and follows the
//! module tree the way the compiler does: `mod name;` resolves to `name.rs`
//! or `name/mod.rs` next to the declaring module, `#[path = ".."]` is
//! honoured, and inline `mod name { .. }` blocks are walked in place. Files
//! are read through a `cap_std` directory handle rooted at the entry file's
//! directory, so `#[path]` values cannot reach outside it. Items, modules and
//! fields whose `#[cfg(..)]` is false under the active [`CfgSet`] are skipped.

mod cfg;
mod convert;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use syn::Item;
use syn::ext::IdentExt;

use crate::declaration::{Declaration, Package};
use crate::error::SourceError;

pub use cfg::CfgSet;

/// Provides the declarations visible to a pass; the host toolchain's
/// enumeration facility.
pub trait DeclarationSource {
    /// Returns every type declaration, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the declarations cannot be read.
    fn declarations(&self) -> Result<Vec<Declaration>, SourceError>;
}

impl DeclarationSource for [Declaration] {
    fn declarations(&self) -> Result<Vec<Declaration>, SourceError> {
        Ok(self.to_vec())
    }
}

impl DeclarationSource for Vec<Declaration> {
    fn declarations(&self) -> Result<Vec<Declaration>, SourceError> {
        Ok(self.clone())
    }
}

/// Reads declarations from the module tree rooted at an entry file.
#[derive(Debug, Clone)]
pub struct CrateSource {
    src_dir: Utf8PathBuf,
    entry: Utf8PathBuf,
    cfg: CfgSet,
}

impl CrateSource {
    /// Uses `entry` (typically `src/lib.rs`) as the crate root file, with
    /// [`CfgSet::current`] deciding which items are compiled in.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingEntry`] when `entry` has no file name.
    pub fn new(entry: impl AsRef<Utf8Path>) -> Result<Self, SourceError> {
        let entry = entry.as_ref();
        let file_name = entry
            .file_name()
            .ok_or_else(|| SourceError::MissingEntry(entry.to_path_buf()))?;
        let src_dir = entry
            .parent()
            .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
        Ok(Self {
            src_dir,
            entry: Utf8PathBuf::from(file_name),
            cfg: CfgSet::current(),
        })
    }

    /// Replaces the configuration `#[cfg(..)]` attributes are checked against.
    #[must_use]
    pub fn with_cfg(mut self, cfg: CfgSet) -> Self {
        self.cfg = cfg;
        self
    }

    /// Finds `src/lib.rs`, else `src/main.rs`, below a package directory.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingEntry`] when neither file exists.
    pub fn discover(manifest_dir: &Utf8Path) -> Result<Self, SourceError> {
        let src_dir = manifest_dir.join("src");
        ["lib.rs", "main.rs"]
            .iter()
            .map(|name| src_dir.join(name))
            .find(|candidate| candidate.is_file())
            .map_or_else(
                || Err(SourceError::MissingEntry(src_dir.clone())),
                Self::new,
            )
    }

    /// Directory holding the entry file.
    #[must_use]
    pub fn src_dir(&self) -> &Utf8Path {
        &self.src_dir
    }

    fn open_root(&self) -> Result<Dir, SourceError> {
        Dir::open_ambient_dir(&self.src_dir, ambient_authority()).map_err(|io_err| {
            SourceError::Io {
                path: self.src_dir.clone(),
                source: io_err,
            }
        })
    }
}

impl DeclarationSource for CrateSource {
    fn declarations(&self) -> Result<Vec<Declaration>, SourceError> {
        let walker = Walker {
            root: self.open_root()?,
            src_dir: &self.src_dir,
            cfg: &self.cfg,
        };
        let mut found = Vec::new();
        let scope = Scope {
            package: Package::root(),
            child_dir: Utf8PathBuf::new(),
            path_base: Utf8PathBuf::new(),
        };
        walker.walk_file(&self.entry, &scope, &mut found)?;
        tracing::debug!(
            entry = %self.src_dir.join(&self.entry),
            declarations = found.len(),
            "scanned crate sources"
        );
        Ok(found)
    }
}

/// Where child modules of the module being walked live.
struct Scope {
    package: Package,
    /// Directory for `mod name;` lookups, relative to the source root.
    child_dir: Utf8PathBuf,
    /// Directory `#[path]` values are resolved against.
    path_base: Utf8PathBuf,
}

struct Walker<'a> {
    root: Dir,
    src_dir: &'a Utf8Path,
    cfg: &'a CfgSet,
}

impl Walker<'_> {
    fn walk_file(
        &self,
        relative: &Utf8Path,
        scope: &Scope,
        found: &mut Vec<Declaration>,
    ) -> Result<(), SourceError> {
        let display_path = self.src_dir.join(relative);
        let text = self
            .root
            .read_to_string(relative)
            .map_err(|io_err| SourceError::Io {
                path: display_path.clone(),
                source: io_err,
            })?;
        let file = syn::parse_file(&text).map_err(|err| SourceError::Parse {
            path: display_path.clone(),
            line: err.span().start().line,
            message: err.to_string(),
        })?;
        if !self.cfg.is_enabled(&file.attrs) {
            tracing::debug!(file = %display_path, "file disabled by #![cfg]");
            return Ok(());
        }
        self.walk_items(&file.items, scope, &display_path, found)
    }

    fn walk_items(
        &self,
        items: &[Item],
        scope: &Scope,
        file: &Utf8Path,
        found: &mut Vec<Declaration>,
    ) -> Result<(), SourceError> {
        for item in items {
            if let Item::Mod(module) = item {
                if self.cfg.is_enabled(&module.attrs) {
                    self.walk_module(module, scope, file, found)?;
                }
            } else if let Some(declaration) =
                convert::declaration(item, &scope.package, file, self.cfg)
            {
                found.push(declaration);
            }
        }
        Ok(())
    }

    fn walk_module(
        &self,
        module: &syn::ItemMod,
        scope: &Scope,
        file: &Utf8Path,
        found: &mut Vec<Declaration>,
    ) -> Result<(), SourceError> {
        let dir_name = module.ident.unraw().to_string();
        let package = scope.package.child(&module.ident.to_string());
        let explicit_path = path_attribute(module);

        if let Some((_, items)) = &module.content {
            let child_dir = match &explicit_path {
                Some(path) => scope.path_base.join(path),
                None => scope.child_dir.join(&dir_name),
            };
            let inner = Scope {
                package,
                path_base: child_dir.clone(),
                child_dir,
            };
            return self.walk_items(items, &inner, file, found);
        }

        let resolved = match explicit_path {
            Some(path) => {
                let target = scope.path_base.join(path);
                self.root.is_file(&target).then(|| {
                    let dir = target.parent().map(Utf8Path::to_path_buf).unwrap_or_default();
                    (target, dir)
                })
            }
            None => self.locate_module_file(&scope.child_dir, &dir_name),
        };

        let Some((target, child_dir)) = resolved else {
            tracing::warn!(
                module = %package,
                declared_in = %file,
                "module file not found; skipping"
            );
            return Ok(());
        };

        let path_base = target.parent().map(Utf8Path::to_path_buf).unwrap_or_default();
        let inner = Scope {
            package,
            child_dir,
            path_base,
        };
        self.walk_file(&target, &inner, found)
    }

    /// Resolves `mod name;` to `name.rs` or `name/mod.rs` below `dir`,
    /// returning the file and the directory of its own child modules.
    fn locate_module_file(&self, dir: &Utf8Path, name: &str) -> Option<(Utf8PathBuf, Utf8PathBuf)> {
        let module_dir = dir.join(name);
        let sibling = dir.join(format!("{name}.rs"));
        if self.root.is_file(&sibling) {
            return Some((sibling, module_dir));
        }
        let nested = module_dir.join("mod.rs");
        self.root
            .is_file(&nested)
            .then_some((nested, module_dir))
    }
}

fn path_attribute(module: &syn::ItemMod) -> Option<String> {
    module
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("path"))
        .find_map(|attr| match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(path),
                        ..
                    }),
                ..
            }) => Some(path.value()),
            _ => None,
        })
}

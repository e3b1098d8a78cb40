//! Evaluation of `#[cfg(..)]` predicates during discovery.
//!
//! Only items the compiler will actually see may reach the generated unit, so
//! the walk drops items, modules and fields whose `cfg` is false. Inside a
//! build script the active configuration comes from Cargo's `CARGO_CFG_*` and
//! `CARGO_FEATURE_*` variables; elsewhere it falls back to the host the tool
//! was compiled for. `test` is never set: generated code is part of the
//! regular build.

use std::collections::BTreeSet;
use std::env::consts;

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, MetaNameValue, Token};

const CFG_PREFIX: &str = "CARGO_CFG_";
const FEATURE_PREFIX: &str = "CARGO_FEATURE_";

/// The set of active `cfg` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfgSet {
    options: BTreeSet<(String, Option<String>)>,
    features: BTreeSet<String>,
}

impl CfgSet {
    /// An empty set; only negated predicates hold against it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a name-only option such as `unix`.
    #[must_use]
    pub fn with_flag(mut self, name: &str) -> Self {
        self.insert(name, None);
        self
    }

    /// Sets a key-value option such as `target_os = "linux"`.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.insert(name, Some(value.to_owned()));
        self
    }

    /// Enables a Cargo feature.
    #[must_use]
    pub fn with_feature(mut self, feature: &str) -> Self {
        self.features.insert(normalize_feature(feature));
        self
    }

    /// The build script's configuration when run by Cargo, else the host's.
    #[must_use]
    pub fn current() -> Self {
        if std::env::var_os("CARGO_CFG_TARGET_OS").is_some() {
            Self::from_vars(
                std::env::vars_os()
                    .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
            )
        } else {
            Self::host()
        }
    }

    /// Reads `CARGO_CFG_*` and `CARGO_FEATURE_*` pairs; other variables are
    /// ignored.
    ///
    /// An empty value sets a name-only option; otherwise each comma-separated
    /// value becomes one key-value option.
    #[must_use]
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut set = Self::new();
        for (key, value) in vars {
            if let Some(feature) = key.strip_prefix(FEATURE_PREFIX) {
                set.features.insert(normalize_feature(feature));
            } else if let Some(name) = key.strip_prefix(CFG_PREFIX) {
                let option = name.to_ascii_lowercase();
                if value.is_empty() {
                    set.insert(&option, None);
                } else {
                    for part in value.split(',') {
                        set.insert(&option, Some(part.to_owned()));
                    }
                }
            }
        }
        set
    }

    /// Options of the platform this code was compiled for.
    #[must_use]
    pub fn host() -> Self {
        let mut set = Self::new()
            .with_value("target_os", consts::OS)
            .with_value("target_family", consts::FAMILY)
            .with_value("target_arch", consts::ARCH)
            .with_value("target_pointer_width", &usize::BITS.to_string());
        if !consts::FAMILY.is_empty() {
            set = set.with_flag(consts::FAMILY);
        }
        if cfg!(debug_assertions) {
            set = set.with_flag("debug_assertions");
        }
        set
    }

    /// Returns `false` when any `#[cfg(..)]` among `attrs` is false.
    ///
    /// A predicate that cannot be parsed is treated as true; the compiler
    /// reports it on its own.
    #[must_use]
    pub fn is_enabled(&self, attrs: &[Attribute]) -> bool {
        attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .all(|attr| {
                attr.parse_args::<Meta>()
                    .map_or(true, |predicate| self.evaluate(&predicate))
            })
    }

    fn evaluate(&self, predicate: &Meta) -> bool {
        match predicate {
            Meta::Path(path) => path
                .get_ident()
                .is_some_and(|ident| self.has(&ident.to_string(), None)),
            Meta::NameValue(MetaNameValue {
                path,
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(value),
                        ..
                    }),
                ..
            }) => path
                .get_ident()
                .is_some_and(|ident| self.has(&ident.to_string(), Some(&value.value()))),
            Meta::NameValue(_) => false,
            Meta::List(list) => {
                let Ok(nested) =
                    list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
                else {
                    return true;
                };
                if list.path.is_ident("all") {
                    nested.iter().all(|inner| self.evaluate(inner))
                } else if list.path.is_ident("any") {
                    nested.iter().any(|inner| self.evaluate(inner))
                } else if list.path.is_ident("not") {
                    nested.len() == 1 && !nested.iter().any(|inner| self.evaluate(inner))
                } else {
                    false
                }
            }
        }
    }

    fn has(&self, name: &str, value: Option<&str>) -> bool {
        match (name, value) {
            ("test", _) => false,
            ("feature", Some(feature)) => self.features.contains(&normalize_feature(feature)),
            _ => self
                .options
                .contains(&(name.to_owned(), value.map(str::to_owned))),
        }
    }

    fn insert(&mut self, name: &str, value: Option<String>) {
        match (name, value) {
            ("test", _) => {}
            ("feature", Some(feature)) => {
                self.features.insert(normalize_feature(&feature));
            }
            (_, value) => {
                self.options.insert((name.to_owned(), value));
            }
        }
    }
}

/// Cargo exposes `my-feature` as `CARGO_FEATURE_MY_FEATURE`.
fn normalize_feature(feature: &str) -> String {
    feature.to_ascii_lowercase().replace('-', "_")
}

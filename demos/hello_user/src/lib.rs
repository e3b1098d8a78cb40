//! Sample crate whose model types render through a generated `StringUtil`.
//!
//! The build script scans this crate, finds the types marked with
//! `#[static_string_util]` and writes `model/string_util.rs` into `OUT_DIR`;
//! [`model`] includes it. [`billing::Invoice`] is marked too, and because the
//! unit lives in the package of the first marked type, its helper is reached
//! through `crate::model::StringUtil`.

pub mod model;

pub mod billing;

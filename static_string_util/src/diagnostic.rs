//! Diagnostics reported by a pass.
//!
//! Every diagnostic is an error. Messages are fixed strings parameterised
//! only by the marker and declaration names, so identical input always
//! produces identical diagnostics.

use std::fmt;

use crate::batch::MarkedDeclaration;
use crate::config::Marker;
use crate::declaration::{Anchor, Declaration};

/// An error message, optionally anchored to the declaration that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Message text.
    pub message: String,
    /// Qualified name of the declaration the message is about.
    pub declaration: Option<String>,
    /// Source location, when the front-end knows it.
    pub anchor: Option<Anchor>,
}

impl Diagnostic {
    fn anchored(message: String, declaration: &Declaration) -> Self {
        Self {
            message,
            declaration: Some(declaration.qualified_name.clone()),
            anchor: declaration.anchor.clone(),
        }
    }

    /// The declaration is not `pub`.
    #[must_use]
    pub fn not_public(marker: &Marker, declaration: &Declaration) -> Self {
        Self::anchored(
            format!("Classes annotated with {marker} must be public."),
            declaration,
        )
    }

    /// The declaration is a trait.
    #[must_use]
    pub fn is_abstract(marker: &Marker, declaration: &Declaration) -> Self {
        Self::anchored(
            format!("Classes annotated with {marker} must not be abstract."),
            declaration,
        )
    }

    /// Describing an accepted declaration failed.
    #[must_use]
    pub fn process_failed(declaration: &Declaration, detail: &str) -> Self {
        Self::anchored(
            format!(
                "Couldn't process class {}: {detail}",
                declaration.qualified_name
            ),
            declaration,
        )
    }

    /// Generation failed for a reason tied to one batch member.
    #[must_use]
    pub fn generation_failed_at(declaration: &MarkedDeclaration, detail: &str) -> Self {
        Self {
            message: format!("Couldn't generate class: {detail}"),
            declaration: Some(declaration.qualified_name.clone()),
            anchor: declaration.anchor.clone(),
        }
    }

    /// Generation failed for a reason not tied to a declaration.
    #[must_use]
    pub fn generation_failed(detail: &str) -> Self {
        Self {
            message: format!("Couldn't generate class: {detail}"),
            declaration: None,
            anchor: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{anchor}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Destination for diagnostics; the host toolchain's error stream.
pub trait DiagnosticSink {
    /// Reports one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Sink for Cargo build scripts.
///
/// Cargo only surfaces build-script output through `cargo:warning=` lines,
/// so each diagnostic is written as one such line prefixed with `error:`.
/// The build helper fails the build afterwards.
#[derive(Debug, Default)]
pub struct CargoSink {
    reported: usize,
}

impl CargoSink {
    /// Number of diagnostics written so far.
    #[must_use]
    pub const fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for CargoSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        use std::io::Write;

        self.reported += 1;
        let line = diagnostic.to_string().replace('\n', " ");
        // A closed stdout only loses the message; the build still fails on the count.
        let _ignored = writeln!(std::io::stdout().lock(), "cargo:warning=error: {line}");
    }
}

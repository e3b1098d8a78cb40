//! One discovery pass, from declarations to an emitted unit.
//!
//! [`run_pass`] is the pure pipeline: scan, validate, describe, generate. It
//! never touches the filesystem and reports everything through its return
//! value. [`Round`] wires it to the injected capabilities: a
//! [`DeclarationSource`], a [`DiagnosticSink`] and an [`Emitter`].

use crate::batch::{Batch, describe};
use crate::config::GeneratorConfig;
use crate::declaration::Declaration;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::emit::{EmittedUnit, Emitter};
use crate::error::{GenerateError, StringUtilError};
use crate::generator::{GeneratedUnit, generate};
use crate::scanner::scan;
use crate::source::DeclarationSource;
use crate::validator::{Verdict, validate};

/// Everything a pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    /// `None` when no valid marked declaration was found; otherwise the
    /// generation result for the batch.
    pub unit: Option<Result<GeneratedUnit, GenerateError>>,
    /// Diagnostics in the order they arose.
    pub diagnostics: Vec<Diagnostic>,
}

/// Collects the batch for a pass.
///
/// Every candidate is evaluated on its own: a rejected or undescribable
/// candidate adds one diagnostic and the loop moves on to the next one.
#[must_use]
pub fn collect_batch(declarations: &[Declaration], config: &GeneratorConfig) -> (Batch, Vec<Diagnostic>) {
    let mut batch = Batch::new();
    let mut diagnostics = Vec::new();

    for candidate in scan(declarations, &config.marker) {
        match validate(candidate, &config.marker) {
            Verdict::Rejected(diagnostic) => {
                tracing::debug!(declaration = %candidate.qualified_name, "candidate rejected");
                diagnostics.push(diagnostic);
            }
            Verdict::Accepted => match describe(candidate) {
                Ok(marked) => batch.push(marked),
                Err(err) => {
                    diagnostics.push(Diagnostic::process_failed(candidate, &err.to_string()));
                }
            },
        }
    }
    (batch, diagnostics)
}

/// Runs the pipeline over `declarations`.
///
/// An empty batch yields no unit and only the diagnostics of rejected
/// candidates, if any. A failed generation adds one
/// `Couldn't generate class` diagnostic anchored at the offending
/// declaration.
#[must_use]
pub fn run_pass(declarations: &[Declaration], config: &GeneratorConfig) -> PassOutcome {
    let (batch, mut diagnostics) = collect_batch(declarations, config);
    if batch.is_empty() {
        return PassOutcome {
            unit: None,
            diagnostics,
        };
    }

    tracing::debug!(declarations = batch.len(), "generating unit");
    let unit = generate(&batch, config);
    if let Err(err) = &unit {
        diagnostics.push(generation_diagnostic(&batch, err));
    }
    PassOutcome {
        unit: Some(unit),
        diagnostics,
    }
}

fn generation_diagnostic(batch: &Batch, err: &GenerateError) -> Diagnostic {
    let culprit = match err {
        GenerateError::MissingPackage { declaration }
        | GenerateError::InvalidOutput { declaration, .. } => batch
            .iter()
            .find(|marked| &marked.qualified_name == declaration),
        GenerateError::EmptyBatch => None,
    };
    culprit.map_or_else(
        || Diagnostic::generation_failed(&err.to_string()),
        |marked| Diagnostic::generation_failed_at(marked, &err.to_string()),
    )
}

/// Summary of a completed round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// The unit written this round, if any.
    pub emitted: Option<EmittedUnit>,
    /// Number of diagnostics reported to the sink.
    pub diagnostics: usize,
}

impl RoundReport {
    /// Returns `true` when the round reported no diagnostics.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.diagnostics == 0
    }
}

/// Runs passes against injected host capabilities.
///
/// A round keeps no state between calls to [`Round::run`]; running it again
/// starts from a fresh batch and overwrites any unit with the same name.
pub struct Round<'a, S: ?Sized, D: ?Sized, E: ?Sized> {
    config: &'a GeneratorConfig,
    source: &'a S,
    sink: &'a mut D,
    emitter: &'a mut E,
}

impl<'a, S, D, E> Round<'a, S, D, E>
where
    S: DeclarationSource + ?Sized,
    D: DiagnosticSink + ?Sized,
    E: Emitter + ?Sized,
{
    /// Bundles the configuration and capabilities for a round.
    pub const fn new(
        config: &'a GeneratorConfig,
        source: &'a S,
        sink: &'a mut D,
        emitter: &'a mut E,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            emitter,
        }
    }

    /// Runs one pass and emits its unit.
    ///
    /// Diagnostics are forwarded to the sink as they are produced. A failed
    /// emission is reported to the sink as a generic generation failure and
    /// also returned.
    ///
    /// # Errors
    ///
    /// Returns [`StringUtilError::Config`] for an unusable configuration,
    /// [`StringUtilError::Source`] when declarations cannot be read and
    /// [`StringUtilError::Emit`] when the unit cannot be written.
    pub fn run(&mut self) -> Result<RoundReport, StringUtilError> {
        self.config.validate()?;
        let declarations = self.source.declarations()?;
        let outcome = run_pass(&declarations, self.config);

        let mut report = RoundReport {
            emitted: None,
            diagnostics: outcome.diagnostics.len(),
        };
        for diagnostic in &outcome.diagnostics {
            self.sink.report(diagnostic);
        }

        let Some(Ok(unit)) = outcome.unit else {
            return Ok(report);
        };
        match self.emitter.emit(&unit) {
            Ok(emitted) => {
                report.emitted = Some(emitted);
                Ok(report)
            }
            Err(err) => {
                self.sink
                    .report(&Diagnostic::generation_failed(&err.to_string()));
                Err(err.into())
            }
        }
    }
}

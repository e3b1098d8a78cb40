//! Accessibility and shape rules for marked declarations.

use crate::config::Marker;
use crate::declaration::Declaration;
use crate::diagnostic::Diagnostic;

/// Result of validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate may be extracted and generated.
    Accepted,
    /// The candidate is excluded; the diagnostic explains why.
    Rejected(Diagnostic),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Validates a single candidate.
///
/// Rules apply in order and the first failing rule decides the diagnostic:
/// the candidate must be `pub`, then it must not be a trait.
#[must_use]
pub fn validate(candidate: &Declaration, marker: &Marker) -> Verdict {
    if !candidate.visibility.is_public() {
        return Verdict::Rejected(Diagnostic::not_public(marker, candidate));
    }
    if candidate.kind.is_abstract() {
        return Verdict::Rejected(Diagnostic::is_abstract(marker, candidate));
    }
    Verdict::Accepted
}

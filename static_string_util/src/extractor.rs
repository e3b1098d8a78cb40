//! Field extraction.

use crate::declaration::{Declaration, MemberKind};

/// Returns the names of the direct data members of `declaration`.
///
/// Only struct fields count, named or positional, in declaration order and
/// without deduplication. Variants, union fields and trait items are skipped.
#[must_use]
pub fn extract_fields(declaration: &Declaration) -> Vec<String> {
    declaration
        .members
        .iter()
        .filter(|member| member.kind == MemberKind::Field)
        .map(|member| member.name.clone())
        .collect()
}

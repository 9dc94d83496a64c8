//! Combined selection expression over every entry of an algebra.

use super::spec::RepresentationAlgebra;

/// Boundary token between projected selections.
pub const OR: &str = " OR ";

/// Non-empty selections of every entry, in declaration order.
#[must_use]
pub fn collect_selections(algebra: &RepresentationAlgebra) -> Vec<&str> {
    algebra
        .iter()
        .filter_map(|spec| spec.selection())
        .filter(|sele| !sele.trim().is_empty())
        .collect()
}

/// Join the selection of every entry with `OR`, for collaborators that need
/// "all atoms touched by any current representation".
///
/// Entries without a selection are skipped. Selections are opaque and are
/// not rewritten.
#[must_use]
pub fn project_selections(algebra: &RepresentationAlgebra) -> String {
    collect_selections(algebra).join(OR)
}

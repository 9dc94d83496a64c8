//! Reconcile the active representation set against a newly parsed one.
//!
//! Matching is by canonical key with multiplicity: two entries that render
//! identically are still two slots. Active entries consume supply from the
//! next set first-come-first-served; whatever they cannot match is removed.
//! For each key, the earliest occurrences in the next set stand for the kept
//! entries and the later ones are added in declaration order. Kept entries
//! appear in neither list, so the caller's engine-side handles for them
//! survive the update.

use rustc_hash::FxHashMap;

use super::spec::{RepresentationAlgebra, RepresentationSpec};

/// An active entry scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    /// Position of the entry in the active set.
    pub index: usize,
    /// The entry itself.
    pub spec: RepresentationSpec,
}

/// Result of [`diff`]: what the caller must tear down and what it must
/// create.
///
/// Callers apply `to_remove` before `to_add`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgebraDiff {
    /// Active entries with no remaining counterpart in the next set, in
    /// active order.
    pub to_remove: Vec<EntryRef>,
    /// Next entries not matched by any active entry, in declaration order.
    pub to_add: Vec<RepresentationSpec>,
    /// Number of active entries kept as-is.
    pub kept: usize,
}

impl AlgebraDiff {
    /// Whether applying this diff changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }

    /// Tear down everything in `active` and create everything in `next`.
    ///
    /// Used when the underlying structure changes and no engine-side handle
    /// can be reused.
    #[must_use]
    pub fn full_rebuild(
        active: Option<&RepresentationAlgebra>,
        next: &RepresentationAlgebra,
    ) -> Self {
        let to_remove = active
            .map(|active| {
                active
                    .iter()
                    .enumerate()
                    .map(|(index, spec)| EntryRef {
                        index,
                        spec: spec.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            to_remove,
            to_add: next.entries().to_vec(),
            kept: 0,
        }
    }
}

/// Compute which active entries to remove and which next entries to add.
///
/// A missing `active` set is an empty baseline. Never fails.
#[must_use]
pub fn diff(
    active: Option<&RepresentationAlgebra>,
    next: &RepresentationAlgebra,
) -> AlgebraDiff {
    let next_keys: Vec<String> =
        next.iter().map(RepresentationSpec::canonical_key).collect();
    let mut supply: FxHashMap<&str, usize> = FxHashMap::default();
    for key in &next_keys {
        *supply.entry(key.as_str()).or_default() += 1;
    }

    let mut result = AlgebraDiff::default();
    let mut matched: FxHashMap<String, usize> = FxHashMap::default();
    for (index, spec) in active.into_iter().flatten().enumerate() {
        let key = spec.canonical_key();
        match supply.get_mut(key.as_str()) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                *matched.entry(key).or_default() += 1;
                result.kept += 1;
            }
            _ => result.to_remove.push(EntryRef {
                index,
                spec: spec.clone(),
            }),
        }
    }

    // The first `matched[key]` occurrences of a key in `next` stand for the
    // kept entries; later occurrences are new.
    for (spec, key) in next.iter().zip(&next_keys) {
        match matched.get_mut(key) {
            Some(skip) if *skip > 0 => *skip -= 1,
            _ => result.to_add.push(spec.clone()),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::parser::parse;
    use crate::algebra::spec::FieldMap;

    fn algebra(raw: &str) -> RepresentationAlgebra {
        parse(raw, &FieldMap::new())
    }

    fn keys(specs: &[RepresentationSpec]) -> Vec<String> {
        specs.iter().map(RepresentationSpec::canonical_key).collect()
    }

    fn removed_keys(refs: &[EntryRef]) -> Vec<String> {
        refs.iter().map(|r| r.spec.canonical_key()).collect()
    }

    #[test]
    fn missing_active_set_adds_everything() {
        let next = algebra("sele=A++sele=B++sele=A");
        let result = diff(None, &next);
        assert!(result.to_remove.is_empty());
        assert_eq!(keys(&result.to_add), vec!["sele=A", "sele=B", "sele=A"]);
    }

    #[test]
    fn empty_active_set_adds_everything() {
        let next = algebra("sele=A,rep=cartoon++sele=B");
        let result = diff(Some(&RepresentationAlgebra::empty()), &next);
        assert!(result.to_remove.is_empty());
        assert_eq!(result.to_add, next.entries());
    }

    #[test]
    fn empty_next_set_removes_everything() {
        let active = algebra("sele=A++sele=B");
        let result = diff(Some(&active), &RepresentationAlgebra::empty());
        assert!(result.to_add.is_empty());
        assert_eq!(removed_keys(&result.to_remove), vec!["sele=A", "sele=B"]);
        assert_eq!(result.to_remove[1].index, 1);
    }

    #[test]
    fn shared_entries_are_kept() {
        let active = algebra("sele=A++sele=B");
        let next = algebra("sele=B++sele=C");
        let result = diff(Some(&active), &next);
        assert_eq!(removed_keys(&result.to_remove), vec!["sele=A"]);
        assert_eq!(result.to_remove[0].index, 0);
        assert_eq!(keys(&result.to_add), vec!["sele=C"]);
        assert_eq!(result.kept, 1);
    }

    #[test]
    fn surplus_duplicates_are_removed() {
        let active = algebra("sele=X++sele=X");
        let next = algebra("sele=X");
        let result = diff(Some(&active), &next);
        assert_eq!(result.to_remove.len(), 1);
        assert_eq!(result.to_remove[0].index, 1);
        assert_eq!(result.to_remove[0].spec.canonical_key(), "sele=X");
        assert!(result.to_add.is_empty());
    }

    #[test]
    fn missing_duplicates_are_added() {
        let active = algebra("sele=X");
        let next = algebra("sele=X++sele=Y++sele=X");
        let result = diff(Some(&active), &next);
        assert!(result.to_remove.is_empty());
        assert_eq!(keys(&result.to_add), vec!["sele=Y", "sele=X"]);
    }

    #[test]
    fn added_duplicates_keep_declaration_order() {
        let active = algebra("sele=A");
        let next = algebra("sele=A++sele=B++sele=A++sele=C++sele=A");
        let result = diff(Some(&active), &next);
        assert_eq!(result.kept, 1);
        assert_eq!(
            keys(&result.to_add),
            vec!["sele=B", "sele=A", "sele=C", "sele=A"]
        );

        let fresh = diff(None, &next);
        assert_eq!(fresh.to_add, next.entries());
    }

    #[test]
    fn field_order_does_not_matter() {
        let active = algebra("rep=cartoon,sele=A");
        let next = algebra("sele=A, rep=cartoon");
        let result = diff(Some(&active), &next);
        assert!(result.is_empty());
        assert_eq!(result.kept, 1);
    }

    #[test]
    fn placeholders_diff_like_any_entry() {
        let active = algebra("sele=A++");
        let next = algebra("++sele=A");
        assert!(diff(Some(&active), &next).is_empty());
    }

    #[test]
    fn full_rebuild_replaces_everything() {
        let active = algebra("sele=A++sele=B");
        let next = algebra("sele=A");
        let result = AlgebraDiff::full_rebuild(Some(&active), &next);
        assert_eq!(removed_keys(&result.to_remove), vec!["sele=A", "sele=B"]);
        assert_eq!(keys(&result.to_add), vec!["sele=A"]);
        assert_eq!(result.kept, 0);
    }
}

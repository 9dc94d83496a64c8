//! Representation records and the canonical key the differ matches them by.
//!
//! The canonical key is the sorted `key=value` text of a record. It parses
//! back to the same record as long as no key contains `=` and no value
//! contains `,` or `++`, and values carry no surrounding whitespace.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute name → value map for one representation.
///
/// Keys iterate in sorted order, which keeps the canonical key deterministic
/// no matter how the fields were written in the source string.
pub type FieldMap = BTreeMap<String, String>;

/// Field holding the selection expression.
pub const SELE: &str = "sele";
/// Field holding the representation style (cartoon, licorice, ...).
pub const REP: &str = "rep";
/// Field holding the color scheme.
pub const COLOR: &str = "color";

/// Field names that show up in practice. The parser and differ treat every
/// field uniformly; this list only feeds grammar detection.
pub const RESERVED_FIELDS: [&str; 6] =
    [SELE, REP, COLOR, "opacity", "atom1", "atom2"];

/// Separator between representation entries.
pub const SEGMENT_SEPARATOR: &str = "++";
/// Separator between `key=value` fields of one entry.
pub const FIELD_SEPARATOR: char = ',';
/// Separator between a field's key and value.
pub const ASSIGN: char = '=';

/// One requested visual representation.
///
/// Two specs are equal when their fields are equal, which is the same as
/// their [`canonical_key`](Self::canonical_key)s being equal.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RepresentationSpec {
    fields: FieldMap,
}

impl RepresentationSpec {
    /// Wrap an already-populated field map.
    #[must_use]
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Build a spec from `(key, value)` pairs. Later pairs win.
    ///
    /// Keys and values are stored verbatim. Only specs whose keys avoid `=`
    /// and whose values avoid `,`, `++` and surrounding whitespace survive a
    /// trip through [`canonical_key`](Self::canonical_key) and the parser.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// All fields of this representation.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Value of a single field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Selection expression (`sele`).
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.get(SELE)
    }

    /// Representation style (`rep`).
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.get(REP)
    }

    /// Color scheme (`color`).
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.get(COLOR)
    }

    /// Whether this is a placeholder entry with no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sorted `key=value` pairs joined with `,`.
    ///
    /// Recomputed from the fields on every call; this is the identity the
    /// differ matches on. Empty values and values containing `=` are
    /// written as-is and parse back unchanged.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let mut key = String::new();
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                key.push(FIELD_SEPARATOR);
            }
            key.push_str(name);
            key.push(ASSIGN);
            key.push_str(value);
        }
        key
    }
}

impl fmt::Display for RepresentationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_key())
    }
}

/// Ordered representation entries for one structure.
///
/// Index is declaration order in the source string. Entries may be empty
/// placeholders; callers that map entries to rendering slots rely on the
/// positions staying put.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RepresentationAlgebra {
    entries: Vec<RepresentationSpec>,
}

impl RepresentationAlgebra {
    /// An algebra with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RepresentationSpec] {
        &self.entries
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RepresentationSpec> {
        self.entries.get(index)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RepresentationSpec> {
        self.entries.iter()
    }

    /// Number of entries, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the algebra has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<RepresentationSpec>> for RepresentationAlgebra {
    fn from(entries: Vec<RepresentationSpec>) -> Self {
        Self { entries }
    }
}

impl FromIterator<RepresentationSpec> for RepresentationAlgebra {
    fn from_iter<I: IntoIterator<Item = RepresentationSpec>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RepresentationAlgebra {
    type Item = &'a RepresentationSpec;
    type IntoIter = std::slice::Iter<'a, RepresentationSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Canonical serialization: every entry's canonical key joined with `++`.
impl fmt::Display for RepresentationAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(SEGMENT_SEPARATOR)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_sorts_fields() {
        let spec = RepresentationSpec::from_pairs([
            ("sele", "1-20"),
            ("color", "chainname"),
            ("rep", "cartoon"),
        ]);
        assert_eq!(
            spec.canonical_key(),
            "color=chainname,rep=cartoon,sele=1-20"
        );
    }

    #[test]
    fn canonical_key_ignores_insertion_order() {
        let a =
            RepresentationSpec::from_pairs([("rep", "surface"), ("sele", "A")]);
        let b =
            RepresentationSpec::from_pairs([("sele", "A"), ("rep", "surface")]);
        assert_eq!(a.canonical_key(), b.canonical_key());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_spec_has_empty_key() {
        let spec = RepresentationSpec::default();
        assert!(spec.is_empty());
        assert_eq!(spec.canonical_key(), "");
    }

    #[test]
    fn accessors_read_reserved_fields() {
        let spec = RepresentationSpec::from_pairs([
            ("sele", "protein"),
            ("rep", "cartoon"),
            ("color", "bfactor"),
            ("atom1", "3.CA"),
        ]);
        assert_eq!(spec.selection(), Some("protein"));
        assert_eq!(spec.style(), Some("cartoon"));
        assert_eq!(spec.color(), Some("bfactor"));
        assert_eq!(spec.get("atom1"), Some("3.CA"));
        assert_eq!(spec.get("opacity"), None);
    }

    #[test]
    fn algebra_display_joins_entries() {
        let algebra: RepresentationAlgebra = vec![
            RepresentationSpec::from_pairs([("sele", "A")]),
            RepresentationSpec::default(),
            RepresentationSpec::from_pairs([
                ("sele", "B"),
                ("rep", "licorice"),
            ]),
        ]
        .into();
        assert_eq!(algebra.to_string(), "sele=A++++rep=licorice,sele=B");
        assert_eq!(algebra.len(), 3);
    }

    #[test]
    fn spec_serializes_as_plain_map() {
        let spec = RepresentationSpec::from_pairs([("sele", "dna")]);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"sele":"dna"}"#);
    }
}

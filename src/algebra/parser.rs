//! String → [`RepresentationAlgebra`] parsing.
//!
//! Two grammars share the same outer shape: entries are separated by `++`,
//! each entry is split on a secondary delimiter, and missing slots are filled
//! from defaults.
//!
//! - **Named** (canonical): `sele=protein,rep=cartoon++sele=dna,rep=base`.
//!   Defaults are a [`FieldMap`] applied before the explicit fields.
//! - **Positional** (legacy): `protein=cartoon=bfactor++dna=licorice`. Words
//!   are selection, style and color by position; missing or blank words come
//!   from [`PositionalDefaults`]. Parsed entries are upgraded to named fields
//!   so the differ only ever sees one record shape.
//!
//! Parsing never fails. Malformed tokens are dropped and logged at debug
//! level.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::spec::{
    FieldMap, RepresentationAlgebra, RepresentationSpec, ASSIGN, COLOR,
    FIELD_SEPARATOR, REP, RESERVED_FIELDS, SEGMENT_SEPARATOR, SELE,
};
use crate::options::AlgebraOptions;

/// Which algebra grammar a string is written in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// `key=value` fields separated by `,`.
    #[default]
    Named,
    /// Selection, style and color separated by `=`.
    Positional,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named => f.write_str("named"),
            Self::Positional => f.write_str("positional"),
        }
    }
}

/// Slot defaults and slot names for the positional grammar.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(default)]
pub struct PositionalDefaults {
    /// Fallback value per slot, used when the word is missing or blank.
    pub values: Vec<String>,
    /// Field name each slot is upgraded to.
    pub slots: Vec<String>,
}

impl Default for PositionalDefaults {
    fn default() -> Self {
        Self {
            values: vec!["all".into(), "cartoon".into(), "chainname".into()],
            slots: vec![SELE.into(), REP.into(), COLOR.into()],
        }
    }
}

impl PositionalDefaults {
    /// Field name for slot `index`. Slots past the configured names are
    /// called `slot<index>`.
    #[must_use]
    pub fn slot_name(&self, index: usize) -> String {
        self.slots
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("slot{index}"))
    }
}

/// Parse a named-grammar algebra string.
///
/// Each entry starts as a copy of `defaults`; explicit fields overwrite. A
/// token splits on its first `=` only. Tokens without `=` or with an empty
/// key are skipped. Empty segments still produce an entry.
#[must_use]
pub fn parse(raw: &str, defaults: &FieldMap) -> RepresentationAlgebra {
    raw.split(SEGMENT_SEPARATOR)
        .map(|segment| parse_named_segment(segment, defaults))
        .collect()
}

fn parse_named_segment(
    segment: &str,
    defaults: &FieldMap,
) -> RepresentationSpec {
    let mut fields = defaults.clone();
    for token in segment.trim().split(FIELD_SEPARATOR) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once(ASSIGN) {
            Some((key, value)) if !key.trim().is_empty() => {
                let _ = fields
                    .insert(key.trim().to_owned(), value.trim().to_owned());
            }
            _ => log::debug!("Skipping malformed algebra token '{token}'"),
        }
    }
    RepresentationSpec::new(fields)
}

/// Parse a legacy positional algebra string.
///
/// `"protein=cartoon=bfactor++dna"` with the stock defaults becomes
/// `sele=protein,rep=cartoon,color=bfactor` and
/// `sele=dna,rep=cartoon,color=chainname`.
#[must_use]
pub fn parse_positional(
    raw: &str,
    defaults: &PositionalDefaults,
) -> RepresentationAlgebra {
    raw.split(SEGMENT_SEPARATOR)
        .map(|segment| parse_positional_segment(segment, defaults))
        .collect()
}

fn parse_positional_segment(
    segment: &str,
    defaults: &PositionalDefaults,
) -> RepresentationSpec {
    let words: Vec<&str> = segment.split(ASSIGN).map(str::trim).collect();
    let slot_count = words.len().max(defaults.values.len());
    let mut fields = FieldMap::new();
    for index in 0..slot_count {
        let word = words.get(index).copied().filter(|w| !w.is_empty());
        let value =
            word.or_else(|| defaults.values.get(index).map(String::as_str));
        if let Some(value) = value {
            let _ = fields.insert(defaults.slot_name(index), value.to_owned());
        }
    }
    RepresentationSpec::new(fields)
}

/// A configured parser: grammar mode plus the defaults for that grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parser {
    grammar: Grammar,
    defaults: FieldMap,
    positional: PositionalDefaults,
}

impl Parser {
    /// Named-grammar parser with the given defaults template.
    #[must_use]
    pub fn named(defaults: FieldMap) -> Self {
        Self {
            grammar: Grammar::Named,
            defaults,
            positional: PositionalDefaults::default(),
        }
    }

    /// Legacy positional parser.
    #[must_use]
    pub fn positional(positional: PositionalDefaults) -> Self {
        Self {
            grammar: Grammar::Positional,
            defaults: FieldMap::new(),
            positional,
        }
    }

    /// Build a parser from the `[algebra]` options section.
    #[must_use]
    pub fn from_options(options: &AlgebraOptions) -> Self {
        Self {
            grammar: options.grammar,
            defaults: options.defaults.clone(),
            positional: options.positional.clone(),
        }
    }

    /// Grammar this parser reads.
    #[must_use]
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Named-grammar defaults template.
    #[must_use]
    pub fn defaults(&self) -> &FieldMap {
        &self.defaults
    }

    /// Parse `raw` with the configured grammar.
    #[must_use]
    pub fn parse(&self, raw: &str) -> RepresentationAlgebra {
        match self.grammar {
            Grammar::Named => parse(raw, &self.defaults),
            Grammar::Positional => parse_positional(raw, &self.positional),
        }
    }
}

/// Grammar a single segment clearly belongs to, if any.
///
/// A `,` or a reserved field name before the first `=` marks the named
/// grammar, whatever else follows. Two or more `=` behind an unreserved
/// first word looks positional. Everything else is ambiguous.
fn segment_grammar(segment: &str) -> Option<Grammar> {
    let segment = segment.trim();
    if segment.contains(FIELD_SEPARATOR) {
        return Some(Grammar::Named);
    }
    let (first, _) = segment.split_once(ASSIGN)?;
    if RESERVED_FIELDS.contains(&first.trim()) {
        Some(Grammar::Named)
    } else if segment.matches(ASSIGN).count() > 1 {
        Some(Grammar::Positional)
    } else {
        None
    }
}

/// Guess the grammar of `raw`.
///
/// Returns `None` when no segment is conclusive or when segments disagree.
#[must_use]
pub fn detect_grammar(raw: &str) -> Option<Grammar> {
    let mut named = false;
    let mut positional = false;
    for segment in raw.split(SEGMENT_SEPARATOR) {
        match segment_grammar(segment) {
            Some(Grammar::Named) => named = true,
            Some(Grammar::Positional) => positional = true,
            None => {}
        }
    }
    match (named, positional) {
        (true, false) => Some(Grammar::Named),
        (false, true) => Some(Grammar::Positional),
        _ => None,
    }
}

/// First segment of `raw` that is clearly written in a grammar other than
/// `grammar`.
///
/// A named segment is never ambiguous, so in positional mode any named
/// segment is foreign. A positional-looking segment (`a=b=c`) is also a
/// valid named field whose value contains `=`; in named mode it only counts
/// as foreign when no other segment of `raw` is conclusively named.
#[must_use]
pub fn foreign_segment(raw: &str, grammar: Grammar) -> Option<&str> {
    let mut segments = raw.split(SEGMENT_SEPARATOR).map(str::trim);
    match grammar {
        Grammar::Positional => segments
            .find(|segment| segment_grammar(segment) == Some(Grammar::Named)),
        Grammar::Named => {
            if detect_grammar(raw) == Some(Grammar::Positional) {
                segments.find(|segment| {
                    segment_grammar(segment) == Some(Grammar::Positional)
                })
            } else {
                None
            }
        }
    }
}

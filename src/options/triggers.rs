use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::algebra::Grammar;
use crate::component::ComponentConfig;

/// Partial component configuration. Unset fields leave the current value
/// alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigPatch {
    /// Replacement structure source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Replacement representation algebra.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep_algebra: Option<String>,
}

impl ConfigPatch {
    /// Patch that only swaps the structure source.
    #[must_use]
    pub fn src(src: &str) -> Self {
        Self {
            src: Some(src.to_owned()),
            rep_algebra: None,
        }
    }

    /// Patch that only swaps the representation algebra.
    #[must_use]
    pub fn rep_algebra(rep_algebra: &str) -> Self {
        Self {
            src: None,
            rep_algebra: Some(rep_algebra.to_owned()),
        }
    }

    /// `base` with every set field of this patch applied.
    #[must_use]
    pub fn apply_to(&self, base: &ComponentConfig) -> ComponentConfig {
        ComponentConfig {
            src: self.src.clone().unwrap_or_else(|| base.src.clone()),
            rep_algebra: self
                .rep_algebra
                .clone()
                .unwrap_or_else(|| base.rep_algebra.clone()),
        }
    }
}

/// Trigger id (e.g. a key code) → configuration patch.
///
/// Serializes as a plain table so presets stay readable:
/// ```toml
/// [triggers.Digit2]
/// src = "rcsb://1crn"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TriggerTable {
    /// Maps trigger id → patch.
    pub bindings: BTreeMap<String, ConfigPatch>,
}

impl Default for TriggerTable {
    fn default() -> Self {
        Self::for_grammar(Grammar::Named)
    }
}

impl TriggerTable {
    /// Stock bindings: `Digit1`..`Digit6` switch structures, `Minus` and
    /// `Equal` switch algebras written in `grammar`.
    #[must_use]
    pub fn for_grammar(grammar: Grammar) -> Self {
        let (minus, equal) = match grammar {
            Grammar::Named => (
                "sele=protein,rep=backbone\
                 ++sele=dna,rep=backbone,color=atomindex\
                 ++sele=dna,rep=base",
                "sele=protein,rep=cartoon,color=bfactor\
                 ++sele=ARG,rep=licorice,color=element\
                 ++sele=dna,rep=licorice,color=element",
            ),
            Grammar::Positional => (
                "protein=backbone++dna=backbone=atomindex++dna=base",
                "protein=cartoon=bfactor\
                 ++ARG=licorice=element\
                 ++dna=licorice=element",
            ),
        };
        let bindings = BTreeMap::from([
            ("Digit1".into(), ConfigPatch::src("rcsb://5GKP.mmtf")),
            ("Digit2".into(), ConfigPatch::src("rcsb://1crn")),
            ("Digit3".into(), ConfigPatch::src("rcsb://1Igt")),
            ("Digit4".into(), ConfigPatch::src("rcsb://1RUZ")),
            ("Digit5".into(), ConfigPatch::src("rcsb://4gnk")),
            ("Digit6".into(), ConfigPatch::src("rcsb://5gsk")),
            ("Minus".into(), ConfigPatch::rep_algebra(minus)),
            ("Equal".into(), ConfigPatch::rep_algebra(equal)),
        ]);
        Self { bindings }
    }

    /// Look up the patch bound to a trigger id.
    #[must_use]
    pub fn lookup(&self, trigger: &str) -> Option<&ConfigPatch> {
        self.bindings.get(trigger)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algebra::{FieldMap, Grammar, PositionalDefaults};

/// Grammar mode and defaults used to parse representation algebras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Algebra", inline)]
#[serde(default)]
pub struct AlgebraOptions {
    /// Which grammar algebra strings are written in.
    #[schemars(title = "Grammar")]
    pub grammar: Grammar,
    /// Defaults template for the named grammar. Applied before explicit
    /// fields.
    #[schemars(title = "Named Defaults")]
    pub defaults: FieldMap,
    /// Slot defaults for the positional grammar.
    #[schemars(title = "Positional Defaults")]
    pub positional: PositionalDefaults,
}

impl Default for AlgebraOptions {
    fn default() -> Self {
        let defaults = FieldMap::from([
            ("sele".to_owned(), "all".to_owned()),
            ("rep".to_owned(), "cartoon".to_owned()),
            ("color".to_owned(), "chainname".to_owned()),
        ]);
        Self {
            grammar: Grammar::Named,
            defaults,
            positional: PositionalDefaults::default(),
        }
    }
}

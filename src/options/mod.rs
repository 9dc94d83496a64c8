//! Centralized configuration with TOML preset support.
//!
//! Grammar mode, defaults templates, the initial component configuration and
//! the trigger table are consolidated here. Options serialize to/from TOML so
//! a scene can ship its own preset.

mod algebra;
mod triggers;

use std::path::Path;

pub use algebra::AlgebraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use triggers::{ConfigPatch, TriggerTable};

use crate::algebra::Grammar;
use crate::component::ComponentConfig;
use crate::error::MolrepError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[algebra]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Algebra grammar and defaults.
    pub algebra: AlgebraOptions,
    /// Configuration the component starts from.
    pub component: ComponentConfig,
    /// Trigger id → configuration patch.
    #[schemars(skip)]
    pub triggers: TriggerTable,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolrepError> {
        let content = std::fs::read_to_string(path).map_err(MolrepError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// A preset that selects the positional grammar without its own
    /// `[triggers]` gets the stock bindings rewritten in that grammar.
    pub fn from_toml(content: &str) -> Result<Self, MolrepError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| MolrepError::OptionsParse(e.to_string()))?;
        if options.algebra.grammar != Grammar::Named
            && options.triggers == TriggerTable::default()
        {
            options.triggers =
                TriggerTable::for_grammar(options.algebra.grammar);
        }
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolrepError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolrepError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolrepError::Io)?;
        }
        std::fs::write(path, content).map_err(MolrepError::Io)
    }
}

//! Caller-side state for one molecule in a scene.
//!
//! [`MoleculeComponent`] owns the active representation set between
//! configuration changes and turns each change into engine-level side effects
//! through an injected [`RepresentationSink`]. There is no global viewport:
//! whoever owns the rendering context passes it into every update.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algebra::{
    diff, foreign_segment, project_selections, AlgebraDiff, EntryRef, Parser,
    RepresentationAlgebra, RepresentationSpec,
};
use crate::error::MolrepError;
use crate::options::{Options, TriggerTable};

/// Rendering-context handle that performs the actual engine work.
///
/// Calls arrive in a fixed order per update: removals, then the structure
/// load (only when the source changed), then additions.
pub trait RepresentationSink {
    /// Load a new structure, replacing whatever was loaded before.
    fn load_structure(&mut self, src: &str);
    /// Tear down the representation created for an active entry.
    fn remove_representation(&mut self, entry: &EntryRef);
    /// Create a representation for a new entry.
    fn add_representation(&mut self, spec: &RepresentationSpec);
}

/// Raw configuration of one molecule, as written in the scene markup.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[schemars(title = "Component", inline)]
#[serde(default)]
pub struct ComponentConfig {
    /// Structure source (e.g. `rcsb://1crn` or a file path).
    #[schemars(title = "Source")]
    pub src: String,
    /// Representation algebra string.
    #[schemars(title = "Representation Algebra")]
    pub rep_algebra: String,
}

/// The default algebra is the bare word `all`, which both grammars read as a
/// single entry built from their defaults.
impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            src: "rcsb://1crn".into(),
            rep_algebra: "all".into(),
        }
    }
}

/// What an update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentUpdate {
    /// Configuration identical to the current one; no sink calls were made.
    Unchanged,
    /// The structure was (re)loaded and every representation rebuilt.
    Loaded(AlgebraDiff),
    /// Same structure; representations were reconciled incrementally.
    Reconciled(AlgebraDiff),
}

impl ComponentUpdate {
    /// The diff that was applied, if any.
    #[must_use]
    pub fn diff(&self) -> Option<&AlgebraDiff> {
        match self {
            Self::Unchanged => None,
            Self::Loaded(changes) | Self::Reconciled(changes) => {
                Some(changes)
            }
        }
    }
}

/// One molecule's representation state across configuration changes.
#[derive(Debug, Clone, Default)]
pub struct MoleculeComponent {
    parser: Parser,
    config: Option<ComponentConfig>,
    active: Option<RepresentationAlgebra>,
}

impl MoleculeComponent {
    /// A component with nothing loaded yet.
    #[must_use]
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            config: None,
            active: None,
        }
    }

    /// A component configured from [`Options`]. Nothing is loaded until the
    /// first [`update`](Self::update).
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(Parser::from_options(&options.algebra))
    }

    /// Configuration of the last successful update.
    #[must_use]
    pub fn config(&self) -> Option<&ComponentConfig> {
        self.config.as_ref()
    }

    /// Representation set currently rendered.
    #[must_use]
    pub fn active(&self) -> Option<&RepresentationAlgebra> {
        self.active.as_ref()
    }

    /// Combined selection over every active representation.
    #[must_use]
    pub fn selection(&self) -> String {
        self.active
            .as_ref()
            .map(project_selections)
            .unwrap_or_default()
    }

    /// Apply a new configuration.
    ///
    /// A changed (or first) source reloads the structure and rebuilds every
    /// representation; a changed algebra on the same source only touches the
    /// entries that differ. On error the component is left as it was.
    pub fn update(
        &mut self,
        config: &ComponentConfig,
        sink: &mut impl RepresentationSink,
    ) -> Result<ComponentUpdate, MolrepError> {
        if self.config.as_ref() == Some(config) {
            return Ok(ComponentUpdate::Unchanged);
        }

        let grammar = self.parser.grammar();
        if let Some(segment) = foreign_segment(&config.rep_algebra, grammar) {
            return Err(MolrepError::GrammarMismatch {
                expected: grammar,
                segment: segment.to_owned(),
            });
        }

        let next = self.parser.parse(&config.rep_algebra);
        let src_changed =
            self.config.as_ref().map_or(true, |old| old.src != config.src);

        let update = if src_changed {
            let changes =
                AlgebraDiff::full_rebuild(self.active.as_ref(), &next);
            log::info!(
                "Loading '{}' with {} representation(s)",
                config.src,
                changes.to_add.len()
            );
            apply(&changes, Some(&config.src), sink);
            ComponentUpdate::Loaded(changes)
        } else {
            let changes = diff(self.active.as_ref(), &next);
            log::info!(
                "Reconciled representations of '{}': -{} +{} ={}",
                config.src,
                changes.to_remove.len(),
                changes.to_add.len(),
                changes.kept
            );
            apply(&changes, None, sink);
            ComponentUpdate::Reconciled(changes)
        };

        self.config = Some(config.clone());
        self.active = Some(next);
        Ok(update)
    }

    /// Merge the patch bound to `trigger` into the current configuration and
    /// apply it.
    ///
    /// Returns `Ok(None)` when the trigger is unbound. Before the first
    /// update the patch is applied on top of [`ComponentConfig::default`].
    pub fn apply_trigger(
        &mut self,
        trigger: &str,
        table: &TriggerTable,
        sink: &mut impl RepresentationSink,
    ) -> Result<Option<ComponentUpdate>, MolrepError> {
        let Some(patch) = table.lookup(trigger) else {
            log::debug!("No configuration bound to trigger '{trigger}'");
            return Ok(None);
        };
        let base = self.config.clone().unwrap_or_default();
        let config = patch.apply_to(&base);
        self.update(&config, sink).map(Some)
    }
}

fn apply(
    changes: &AlgebraDiff,
    load: Option<&str>,
    sink: &mut impl RepresentationSink,
) {
    for entry in &changes.to_remove {
        sink.remove_representation(entry);
    }
    if let Some(src) = load {
        sink.load_structure(src);
    }
    for spec in &changes.to_add {
        sink.add_representation(spec);
    }
}

//! Representation algebra: a small string language describing every visual
//! representation of one structure, plus the parser and differ built on it.
//!
//! ```text
//! sele=protein,rep=cartoon,color=bfactor++sele=ARG,rep=licorice
//! ```
//!
//! A caller keeps the active [`RepresentationAlgebra`] between updates,
//! parses each new configuration string with [`parse`] (or a configured
//! [`Parser`]), and hands both sets to [`diff()`]. The resulting
//! [`AlgebraDiff`] lists what to tear down and what to create; unchanged
//! representations appear in neither list.

pub mod diff;
pub mod parser;
pub mod selection;
pub mod spec;

pub use diff::{diff, AlgebraDiff, EntryRef};
pub use parser::{
    detect_grammar, foreign_segment, parse, parse_positional, Grammar, Parser,
    PositionalDefaults,
};
pub use selection::{collect_selections, project_selections};
pub use spec::{FieldMap, RepresentationAlgebra, RepresentationSpec};

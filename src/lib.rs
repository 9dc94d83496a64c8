// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Representation-algebra parser and differ for molecular scene components.
//!
//! A scene component describes everything it renders for one structure as a
//! single string, e.g. `sele=protein,rep=cartoon++sele=ARG,rep=licorice`.
//! This crate turns that string into ordered records and reconciles each new
//! configuration against the one currently rendered, so unchanged
//! representations keep their engine-side state.
//!
//! # Key entry points
//!
//! - [`algebra::parse`] / [`algebra::Parser`] - string →
//!   [`algebra::RepresentationAlgebra`]
//! - [`algebra::diff()`] - active set + next set → [`algebra::AlgebraDiff`]
//! - [`algebra::project_selections`] - combined selection over all entries
//! - [`component::MoleculeComponent`] - caller-side state driving a
//!   [`component::RepresentationSink`]
//! - [`options::Options`] - grammar mode, defaults and trigger table (TOML)
//!
//! Parsing and diffing are pure and never fail. Rendering, structure loading
//! and physics belong to whatever implements the sink.

pub mod algebra;
pub mod component;
pub mod error;
pub mod options;

pub use error::MolrepError;

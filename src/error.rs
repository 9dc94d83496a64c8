//! Crate-level error types.

use std::fmt;

use crate::algebra::Grammar;

/// Errors produced by the molrep crate.
///
/// Parsing and diffing never fail; these come from the configuration
/// boundary around them.
#[derive(Debug)]
pub enum MolrepError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An algebra string contains a segment written in the other grammar.
    GrammarMismatch {
        /// Grammar the parser is configured for.
        expected: Grammar,
        /// The offending segment.
        segment: String,
    },
    /// Bad command-line invocation.
    Usage(String),
}

impl fmt::Display for MolrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::GrammarMismatch { expected, segment } => write!(
                f,
                "algebra segment '{segment}' is not in the {expected} grammar"
            ),
            Self::Usage(msg) => write!(f, "usage: {msg}"),
        }
    }
}

impl std::error::Error for MolrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolrepError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

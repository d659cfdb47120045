//! Error types surfaced by the modeling layer.
//!
//! Parsing problems are reported once, at model construction time, and carry
//! the filename label that was handed to the grammar engine so that failures
//! on scaffolded fragment text are traceable to the stand-alone fragment kind
//! rather than to a nonexistent file.

use thiserror::Error;

/// Errors that can arise while building or querying a model tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The grammar engine rejected the source text. The filename is either
    /// the real path supplied by the caller or the fixed per-kind sentinel
    /// used for stand-alone fragment parsing.
    #[error("error parsing '{filename}': {source}")]
    Parse {
        /// Filename label the text was parsed under.
        filename: String,
        /// Diagnostic reported by the grammar engine.
        #[source]
        source: gherkin::ParseError,
    },
    /// The scaffolded text parsed, but the expected fragment was not present
    /// at its grammatical position (for example, empty fragment text).
    #[error("no {kind} was found in the text parsed from '{filename}'")]
    MissingFragment {
        /// Fragment kind that was being parsed.
        kind: &'static str,
        /// Sentinel filename the scaffold was parsed under.
        filename: &'static str,
    },
    /// An ancestor query named a kind that is not part of the model catalog.
    /// This is a contract violation by the caller, distinct from an exhausted
    /// parent chain (which is reported as "not found", not as an error).
    #[error("'{kind}' is not a valid ancestor kind")]
    InvalidAncestorKind {
        /// The unrecognized kind name.
        kind: String,
    },
}

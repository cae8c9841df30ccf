//! Error types for parsing, resolution, and typed access.
//!
//! Responsibilities:
//! - Define error variants for all parse, resolution, and conversion failures.
//! - Carry enough context (variable names, paths, line numbers) to fix the
//!   configuration without inspecting library internals.
//!
//! Does NOT handle:
//! - Deciding when an error is fatal (see `resolver` for the per-source
//!   optional-file policy and `access` for modifier semantics).
//!
//! Invariants:
//! - Errors NEVER include raw values or line contents. Variable values may be
//!   secrets; messages name the variable and the expectation instead.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal syntax error in one textual source.
///
/// Carries the 1-based line where the offending construct began and the kind
/// of failure, never the offending text itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} starting on line {line}")]
pub struct ParseError {
    /// 1-based line number where the failing construct opened.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// The kinds of fatal parse failures.
///
/// Everything else in the grammar fails soft: lines that cannot be parsed as
/// an assignment are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A quoted value was still open when the input ended.
    #[error("unterminated quoted value (opened with {0})")]
    UnterminatedQuote(char),
}

/// Errors that can occur while resolving an ordered list of sources.
///
/// Any of these aborts the whole resolution: no partial mapping is returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A file source exists but its content has a fatal syntax error.
    #[error("failed to parse env file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A declared file source cannot be opened or read.
    ///
    /// Only the `io::ErrorKind` is reported, identifying the offending source
    /// without exposing partial file contents.
    #[error("cannot read env source {path}: {kind}")]
    Unavailable { path: PathBuf, kind: ErrorKind },
}

/// Structured failure of a single typed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {variable} (wanted {target}): {reason}")]
pub struct ConversionError {
    /// Name of the variable the lookup targeted.
    pub variable: String,
    /// The requested target type, or `"custom"` for injected conversions.
    pub target: &'static str,
    /// The specific cause.
    pub reason: ConvertReason,
}

impl ConversionError {
    pub(crate) fn new(variable: &str, target: &'static str, reason: ConvertReason) -> Self {
        Self {
            variable: variable.to_string(),
            target,
            reason,
        }
    }
}

/// Why a conversion failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertReason {
    /// The variable was unset or empty under the strict (`!`) modifier.
    #[error("variable is required but unset or empty")]
    MissingRequired,

    /// The value is non-empty but cannot be converted. The message states the
    /// expectation, not the value.
    #[error("{0}")]
    Unparsable(&'static str),

    /// An "existing" symbol lookup named a symbol absent from the registry.
    #[error("symbol is not registered")]
    UnknownSymbol,

    /// An injected conversion function reported a failure.
    #[error("{0}")]
    Custom(String),
}

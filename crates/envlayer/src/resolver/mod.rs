//! Source composition: ordered parsing and merging of env sources.
//!
//! Responsibilities:
//! - Define [`Source`]: a `.env` file on disk (required or optional) or a
//!   pre-built in-memory mapping such as the process environment.
//! - Fold an ordered list of sources into one final mapping, later sources
//!   overriding earlier keys.
//! - Hand file sources to the parser together with the accumulator of all
//!   strictly earlier sources, so interpolation never sees later sources.
//!
//! Does NOT handle:
//! - The `.env` grammar itself (see `parser`).
//! - Type coercion of resolved values (see `access`).
//!
//! Invariants:
//! - Resolution is all-or-nothing: any fatal source error aborts the call and
//!   no partial mapping escapes.
//! - A missing optional file is the only suppressed failure; every other I/O
//!   error is fatal even for optional sources.
//! - Log events carry key counts and file paths, never values.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ResolveError;
use crate::map::EnvMap;
use crate::parser::parse_str;

/// One origin of variable definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A `.env`-syntax file that must exist and parse.
    File { path: PathBuf, required: bool },
    /// A ready-made mapping, merged as-is.
    Map(EnvMap),
}

impl Source {
    /// A file source that must exist; a missing or unreadable file aborts
    /// resolution.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File {
            path: path.into(),
            required: true,
        }
    }

    /// A file source that is skipped when the file does not exist. Other I/O
    /// failures still abort.
    pub fn file_optional(path: impl Into<PathBuf>) -> Self {
        Source::File {
            path: path.into(),
            required: false,
        }
    }

    /// A pre-built mapping source.
    pub fn map(vars: EnvMap) -> Self {
        Source::Map(vars)
    }

    /// The live process environment, materialized into an explicit mapping at
    /// construction time. Later mutations of the process environment are not
    /// observed.
    pub fn process_env() -> Self {
        Source::Map(std::env::vars().collect())
    }
}

/// Builder over an ordered list of sources.
///
/// Later sources override earlier keys; interpolation inside a file source
/// sees only values resolved from strictly earlier sources.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    sources: Vec<Source>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any source.
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a required file source.
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        self.source(Source::file(path))
    }

    /// Append an optional file source.
    pub fn file_optional(self, path: impl Into<PathBuf>) -> Self {
        self.source(Source::file_optional(path))
    }

    /// Append a pre-built mapping source.
    pub fn map(self, vars: EnvMap) -> Self {
        self.source(Source::map(vars))
    }

    /// Append the live process environment as a source.
    pub fn process_env(self) -> Self {
        self.source(Source::process_env())
    }

    /// Fold all sources, in order, into the final mapping.
    pub fn resolve(self) -> Result<ResolvedEnv, ResolveError> {
        resolve(self.sources)
    }
}

/// Resolve an ordered list of sources into one immutable mapping.
///
/// The accumulator starts empty and grows left to right: mapping sources
/// merge directly, file sources are read fully, parsed against the current
/// accumulator, and merged. No key is ever deleted, only overwritten.
pub fn resolve(sources: impl IntoIterator<Item = Source>) -> Result<ResolvedEnv, ResolveError> {
    let mut acc = EnvMap::new();

    for source in sources {
        match source {
            Source::Map(vars) => {
                debug!(keys = vars.len(), "merging in-memory source");
                acc.merge(vars);
            }
            Source::File { path, required } => {
                let text = match fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) if !required && e.kind() == ErrorKind::NotFound => {
                        debug!(path = %path.display(), "optional file source missing, skipped");
                        continue;
                    }
                    Err(e) => {
                        return Err(ResolveError::Unavailable {
                            path,
                            kind: e.kind(),
                        });
                    }
                };
                let parsed = parse_str(&text, &acc)
                    .map_err(|source| ResolveError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path.display(), keys = parsed.len(), "merging file source");
                acc.merge(parsed);
            }
        }
    }

    debug!(keys = acc.len(), "resolution complete");
    Ok(ResolvedEnv::new(acc))
}

/// The final resolved mapping plus the typed accessor surface.
///
/// Immutable after resolution; concurrent reads need no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnv {
    vars: EnvMap,
}

impl ResolvedEnv {
    pub(crate) fn new(vars: EnvMap) -> Self {
        Self { vars }
    }

    /// Raw string lookup. `None` when the variable is undefined; typed
    /// accessors treat that the same as an empty value.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key)
    }

    /// The underlying mapping.
    pub fn vars(&self) -> &EnvMap {
        &self.vars
    }

    /// Consume into the underlying mapping.
    pub fn into_vars(self) -> EnvMap {
        self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Wrap an already-final mapping, e.g. in tests or when a caller layers
/// sources by hand.
impl From<EnvMap> for ResolvedEnv {
    fn from(vars: EnvMap) -> Self {
        Self::new(vars)
    }
}

#[cfg(test)]
mod tests;

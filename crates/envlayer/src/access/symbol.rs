//! Symbolic identifier targets and the registry capability.
//!
//! Atoms and module references are tagged string wrappers rather than
//! language-level interned symbols. The "existing" conversions consult an
//! explicit [`SymbolRegistry`] passed in by the caller instead of any global
//! symbol table, keeping lookups pure and testable.

use core::fmt;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{FromEnv, FromEnvExisting};
use crate::error::ConvertReason;

/// A tagged string identifier standing in for a language-level atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The empty symbol, the zero-equivalent for atom targets.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A tagged module/type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// The root-namespace placeholder, the zero-equivalent for module targets.
    pub const ROOT: &'static str = "::";

    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// The set of symbol names an application has declared known.
///
/// Passed explicitly to `existing*` lookups; answers for both atoms and
/// module references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRegistry {
    names: HashSet<String>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a symbol known.
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = SymbolRegistry::new();
        for name in iter {
            registry.register(name);
        }
        registry
    }
}

impl FromEnv for Symbol {
    const TARGET: &'static str = "atom";

    fn zero() -> Self {
        Symbol::empty()
    }

    fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
        Ok(Symbol::new(raw))
    }
}

impl FromEnvExisting for Symbol {
    fn from_registered(raw: &str, registry: &SymbolRegistry) -> Result<Self, ConvertReason> {
        if registry.contains(raw) {
            Ok(Symbol::new(raw))
        } else {
            Err(ConvertReason::UnknownSymbol)
        }
    }
}

impl FromEnv for ModulePath {
    const TARGET: &'static str = "module";

    fn zero() -> Self {
        ModulePath::root()
    }

    fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
        Ok(ModulePath::new(raw))
    }
}

impl FromEnvExisting for ModulePath {
    fn from_registered(raw: &str, registry: &SymbolRegistry) -> Result<Self, ConvertReason> {
        if registry.contains(raw) {
            Ok(ModulePath::new(raw))
        } else {
            Err(ConvertReason::UnknownSymbol)
        }
    }
}

//! Layered environment configuration loading.
//!
//! This crate loads configuration for an application at startup from an
//! ordered sequence of sources (`.env`-syntax files and pre-built mappings
//! such as the live process environment), merges them with later sources
//! overriding earlier ones, and exposes a typed accessor that coerces the raw
//! string values into native types.
//!
//! ```no_run
//! use envlayer::{Resolver, Symbol};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = Resolver::new()
//!     .file(".env")
//!     .file_optional(".env.local")
//!     .process_env()
//!     .resolve()?;
//!
//! let port: u16 = env.get_required("PORT")?;
//! let debug: bool = env.get("DEBUG")?;
//! let region: Option<String> = env.get_opt("REGION")?;
//! let level: Symbol = env.get("LOG_LEVEL")?;
//! # let _ = (port, debug, region, level);
//! # Ok(())
//! # }
//! ```
//!
//! Resolution is all-or-nothing and performed once; the resulting
//! [`ResolvedEnv`] is immutable and safe to share across threads. Typed
//! lookups come in three flavors per target type: `get` (empty input yields
//! the type's zero-equivalent), `get_opt` (empty input yields `None`), and
//! `get_required` (empty input is an error).

mod access;
mod error;
mod map;
mod parser;
mod resolver;

pub use access::{FromEnv, FromEnvExisting, ModulePath, Symbol, SymbolRegistry};
pub use error::{ConversionError, ConvertReason, ParseError, ParseErrorKind, ResolveError};
pub use map::EnvMap;
pub use parser::parse_str;
pub use resolver::{ResolvedEnv, Resolver, Source, resolve};

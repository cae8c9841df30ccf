//! Typed access over the resolved mapping.
//!
//! Responsibilities:
//! - Define the [`FromEnv`] conversion contract (zero-equivalent plus
//!   non-empty conversion) and implement it for the supported target types.
//! - Expose the modifier method families on [`ResolvedEnv`]: default
//!   (`get`), nullable (`get_opt`), strict (`get_required`), registry-checked
//!   symbol lookups (`existing*`), and injected conversions (`get_custom*`).
//!
//! Does NOT handle:
//! - Producing the mapping (see `resolver`).
//!
//! Invariants:
//! - An absent key and an empty value are the same input; only the modifier
//!   decides the outcome for empty input.
//! - Non-empty input converts identically under every modifier and fails with
//!   a [`ConversionError`] naming the variable if it cannot be converted.
//! - Error messages state the expectation, never the raw value.

mod symbol;

pub use symbol::{ModulePath, Symbol, SymbolRegistry};

use core::fmt;

use crate::error::{ConversionError, ConvertReason};
use crate::resolver::ResolvedEnv;

/// Conversion from a raw environment string into a native type.
///
/// `zero()` is the value returned for empty input under the default modifier;
/// `from_raw` is only ever called with non-empty input.
pub trait FromEnv: Sized {
    /// Target type name used in error messages.
    const TARGET: &'static str;

    /// The type's zero-equivalent.
    fn zero() -> Self;

    /// Convert a non-empty raw value.
    fn from_raw(raw: &str) -> Result<Self, ConvertReason>;
}

/// Conversion that additionally requires the value to name an
/// already-registered symbol.
pub trait FromEnvExisting: FromEnv {
    /// Convert a non-empty raw value, consulting the registry.
    fn from_registered(raw: &str, registry: &SymbolRegistry) -> Result<Self, ConvertReason>;
}

impl FromEnv for String {
    const TARGET: &'static str = "string";

    fn zero() -> Self {
        String::new()
    }

    fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
        Ok(raw.to_string())
    }
}

impl FromEnv for bool {
    const TARGET: &'static str = "boolean";

    fn zero() -> Self {
        false
    }

    /// Only the literals `true` and `false` (case-insensitive) convert;
    /// anything else is a conversion failure, never an implicit `false`.
    fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertReason::Unparsable("must be true or false"))
        }
    }
}

impl FromEnv for Vec<char> {
    const TARGET: &'static str = "charlist";

    fn zero() -> Self {
        Vec::new()
    }

    fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
        Ok(raw.chars().collect())
    }
}

macro_rules! impl_from_env_number {
    ($target:literal, $message:literal, $zero:literal => $($ty:ty),+ $(,)?) => {$(
        impl FromEnv for $ty {
            const TARGET: &'static str = $target;

            fn zero() -> Self {
                $zero
            }

            fn from_raw(raw: &str) -> Result<Self, ConvertReason> {
                raw.parse().map_err(|_| ConvertReason::Unparsable($message))
            }
        }
    )+};
}

impl_from_env_number!("integer", "must be an integer", 0 => i8, i16, i32, i64, isize);
impl_from_env_number!("integer", "must be a non-negative integer", 0 => u8, u16, u32, u64, usize);
impl_from_env_number!("float", "must be a number", 0.0 => f32, f64);

impl ResolvedEnv {
    /// Absent keys read as the empty string.
    fn raw(&self, key: &str) -> &str {
        self.var(key).unwrap_or("")
    }

    /// Default modifier: empty input yields the type's zero-equivalent.
    pub fn get<T: FromEnv>(&self, key: &str) -> Result<T, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Ok(T::zero());
        }
        T::from_raw(raw).map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Nullable (`?`) modifier: empty input yields `None`.
    pub fn get_opt<T: FromEnv>(&self, key: &str) -> Result<Option<T>, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Ok(None);
        }
        T::from_raw(raw)
            .map(Some)
            .map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Strict (`!`) modifier: empty input is an error naming the variable.
    pub fn get_required<T: FromEnv>(&self, key: &str) -> Result<T, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Err(ConversionError::new(
                key,
                T::TARGET,
                ConvertReason::MissingRequired,
            ));
        }
        T::from_raw(raw).map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Default modifier over a registry-checked symbol type.
    pub fn existing<T: FromEnvExisting>(
        &self,
        key: &str,
        registry: &SymbolRegistry,
    ) -> Result<T, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Ok(T::zero());
        }
        T::from_registered(raw, registry)
            .map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Nullable (`?`) modifier over a registry-checked symbol type.
    pub fn existing_opt<T: FromEnvExisting>(
        &self,
        key: &str,
        registry: &SymbolRegistry,
    ) -> Result<Option<T>, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Ok(None);
        }
        T::from_registered(raw, registry)
            .map(Some)
            .map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Strict (`!`) modifier over a registry-checked symbol type.
    pub fn existing_required<T: FromEnvExisting>(
        &self,
        key: &str,
        registry: &SymbolRegistry,
    ) -> Result<T, ConversionError> {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Err(ConversionError::new(
                key,
                T::TARGET,
                ConvertReason::MissingRequired,
            ));
        }
        T::from_registered(raw, registry)
            .map_err(|reason| ConversionError::new(key, T::TARGET, reason))
    }

    /// Injected conversion, default modifier.
    ///
    /// The function receives the raw value, including the empty string for
    /// absent variables, and owns the zero-equivalent decision. Any reported
    /// failure is wrapped with the variable name.
    pub fn get_custom<T, F, E>(&self, key: &str, convert: F) -> Result<T, ConversionError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        convert(self.raw(key))
            .map_err(|e| ConversionError::new(key, "custom", ConvertReason::Custom(e.to_string())))
    }

    /// Injected conversion, nullable (`?`) modifier: empty input yields
    /// `None` without invoking the function.
    pub fn get_custom_opt<T, F, E>(&self, key: &str, convert: F) -> Result<Option<T>, ConversionError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Ok(None);
        }
        convert(raw)
            .map(Some)
            .map_err(|e| ConversionError::new(key, "custom", ConvertReason::Custom(e.to_string())))
    }

    /// Injected conversion, strict (`!`) modifier: empty input is an error
    /// without invoking the function.
    pub fn get_custom_required<T, F, E>(&self, key: &str, convert: F) -> Result<T, ConversionError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let raw = self.raw(key);
        if raw.is_empty() {
            return Err(ConversionError::new(
                key,
                "custom",
                ConvertReason::MissingRequired,
            ));
        }
        convert(raw)
            .map_err(|e| ConversionError::new(key, "custom", ConvertReason::Custom(e.to_string())))
    }
}

//! Checker configuration.

use std::fmt;
use std::str::FromStr;

/// Environment variable read by [`CheckOptions::from_env`].
pub const UNIT_KIND_ENV_VAR: &str = "CORVID_UNIT_KIND";

/// What kind of compilation unit is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitKind {
    /// A library: module-scope bindings are checked in the first pass.
    #[default]
    Library,
    /// A program with top-level code: module-scope binding patterns wait for the second pass.
    Main,
}

/// Error returned when a unit kind cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitKindError(String);

impl fmt::Display for ParseUnitKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid unit kind: {} (expected 'library' or 'main')", self.0)
    }
}

impl std::error::Error for ParseUnitKindError {}

impl FromStr for UnitKind {
    type Err = ParseUnitKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" | "lib" => Ok(UnitKind::Library),
            "main" => Ok(UnitKind::Main),
            _ => Err(ParseUnitKindError(s.to_string())),
        }
    }
}

/// Knobs for a [`TypeChecker`](crate::TypeChecker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckOptions {
    /// Kind of unit being checked
    pub unit_kind: UnitKind,
}

impl CheckOptions {
    /// Options for a library unit.
    #[must_use]
    pub const fn library() -> Self {
        Self {
            unit_kind: UnitKind::Library,
        }
    }

    /// Options for a main unit.
    #[must_use]
    pub const fn main() -> Self {
        Self {
            unit_kind: UnitKind::Main,
        }
    }

    /// Reads `CORVID_UNIT_KIND` and configures logging from `CORVID_LOG`.
    ///
    /// An unset or unparsable unit kind falls back to [`UnitKind::Library`].
    #[must_use]
    pub fn from_env() -> Self {
        corvid_log::init_from_env();

        let unit_kind = match std::env::var(UNIT_KIND_ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                corvid_log::warn!("{err}; using library");
                UnitKind::Library
            }),
            Err(_) => UnitKind::Library,
        };
        Self { unit_kind }
    }

    /// Whether module-scope binding patterns are deferred to the second pass.
    #[must_use]
    pub const fn defers_module_bindings(&self) -> bool {
        matches!(self.unit_kind, UnitKind::Main)
    }
}

//! Interned identifiers.
//!
//! A [`Symbol`] is the id of a string owned by a [`StringInterner`]. Two symbols
//! from the same interner are equal exactly when their strings are equal, so
//! name comparisons during checking never touch string data.
//!
//! [`StringInterner`]: crate::StringInterner

use std::fmt;

/// Id of an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Sentinel for "no name", e.g. an anonymous pattern.
    pub const INVALID: Symbol = Symbol(u32::MAX);

    /// Wraps a raw id.
    ///
    /// ```
    /// use corvid_mem::Symbol;
    ///
    /// assert_eq!(Symbol::new(7).index(), 7);
    /// ```
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Raw id as a vector index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for [`Symbol::INVALID`].
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            f.write_str("#invalid")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

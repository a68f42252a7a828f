//! String interning.
//!
//! The interner keeps two views of the same data: a vector indexed by
//! [`Symbol`] id for resolution and a hash map for deduplication. Strings
//! handed to [`StringInterner::with_pre_interned`] receive the lowest ids in
//! order, which lets a language front end pin its keywords to fixed symbols.
//!
//! ```
//! use corvid_mem::StringInterner;
//!
//! let mut interner = StringInterner::with_pre_interned(&["func", "var"]);
//! let func = interner.intern("func");
//! assert_eq!(func.as_u32(), 0);
//! assert!(interner.is_pre_interned(func));
//!
//! let x = interner.intern("x");
//! assert_eq!(interner.resolve(x), Some("x"));
//! assert_eq!(interner.intern("x"), x);
//! ```

use crate::symbol::Symbol;

#[cfg(feature = "string-interner")]
use hashbrown::HashMap;

#[cfg(not(feature = "string-interner"))]
use std::collections::HashMap;

/// Bidirectional string/[`Symbol`] table.
#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    symbols: HashMap<Box<str>, Symbol>,
    pre_interned: u32,
}

impl StringInterner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interner whose first ids belong to `words`, in order.
    #[must_use]
    pub fn with_pre_interned(words: &[&str]) -> Self {
        let mut interner = Self::new();
        for word in words {
            interner.intern(word);
        }
        interner.pre_interned = u32::try_from(interner.strings.len()).unwrap_or(u32::MAX);
        interner
    }

    /// Returns the symbol for `s`, adding it if it is new.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.get(s) {
            return sym;
        }

        let id = u32::try_from(self.strings.len()).expect("interner exhausted the u32 id space");
        let sym = Symbol::new(id);
        let owned: Box<str> = s.into();
        self.strings.push(owned.clone());
        self.symbols.insert(owned, sym);
        sym
    }

    /// Returns the symbol for `s` without interning it.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Returns the string behind `sym`, or `None` for foreign or invalid symbols.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.index()).map(|s| &**s)
    }

    /// Like [`resolve`](Self::resolve) but never fails; unknown symbols render as `<?>`.
    #[must_use]
    pub fn name(&self, sym: Symbol) -> &str {
        self.resolve(sym).unwrap_or("<?>")
    }

    /// Returns `true` if `sym` was one of the pre-interned words.
    #[must_use]
    pub const fn is_pre_interned(&self, sym: Symbol) -> bool {
        sym.as_u32() < self.pre_interned
    }

    /// Number of distinct strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

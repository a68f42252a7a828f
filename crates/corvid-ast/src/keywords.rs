//! Reserved words.
//!
//! Keywords are pre-interned so every [`AstContext`](crate::AstContext) maps
//! them to the same [`Symbol`] ids, and the checker can compare against the
//! constants below without touching the interner.

use corvid_mem::Symbol;

/// Keywords in id order.
pub const KEYWORDS: &[&str] = &[
    "This",
    "import",
    "var",
    "func",
    "static",
    "typealias",
    "oneof",
    "struct",
    "class",
    "protocol",
    "extension",
    "subscript",
    "constructor",
    "destructor",
    "requires",
    "this",
];

/// Number of keywords.
pub const KEYWORD_COUNT: u32 = KEYWORDS.len() as u32;

/// The implicit self-referential associated type of a protocol.
pub const THIS_TYPE: Symbol = Symbol::new(0);

/// Name of the implicit `this` parameter.
pub const THIS_VALUE: Symbol = Symbol::new(15);

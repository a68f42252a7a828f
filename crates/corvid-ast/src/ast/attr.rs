//! Declaration attributes.
//!
//! Attributes are written in brackets before a declaration, e.g.
//! `[infix_left=190] func ** (a: Int, b: Int) -> Int`. The parser records
//! them as-is; the checker clears the ones that are illegal where they appear.

use crate::span::Span;

/// Attribute set attached to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes {
    /// Location of the attribute list
    pub span: Span,
    /// `infix`, `infix_left` or `infix_right` with a precedence
    pub infix: Option<InfixData>,
    /// `postfix`
    pub postfix: bool,
    /// `assignment`
    pub assignment: bool,
    /// `conversion`
    pub conversion: bool,
    /// `byref`
    pub byref: bool,
    /// `auto_closure`
    pub auto_closure: bool,
}

impl Attributes {
    /// Returns `true` if no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.infix.is_none()
            && !self.postfix
            && !self.assignment
            && !self.conversion
            && !self.byref
            && !self.auto_closure
    }

    /// Returns `true` if an infix attribute is present.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        self.infix.is_some()
    }
}

/// Precedence and associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfixData {
    /// Binding strength, higher binds tighter
    pub precedence: u8,
    /// Grouping of chained uses
    pub assoc: Associativity,
}

impl InfixData {
    /// Creates fixity data.
    #[must_use]
    pub const fn new(precedence: u8, assoc: Associativity) -> Self {
        Self { precedence, assoc }
    }
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a ~ b ~ c` groups as `(a ~ b) ~ c`
    Left,
    /// `a ~ b ~ c` groups as `a ~ (b ~ c)`
    Right,
    /// Chaining is an error
    None,
}

/// Characters that start an operator identifier.
pub const OPERATOR_CHARS: &[char] = &[
    '/', '=', '-', '+', '*', '%', '<', '>', '!', '&', '|', '^', '~', '.', '?',
];

/// Returns `true` if `name` is spelled as an operator.
///
/// ```
/// use corvid_ast::ast::attr::is_operator_name;
///
/// assert!(is_operator_name("+++"));
/// assert!(is_operator_name("&"));
/// assert!(!is_operator_name("plus"));
/// assert!(!is_operator_name(""));
/// ```
#[must_use]
pub fn is_operator_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| OPERATOR_CHARS.contains(&c))
}

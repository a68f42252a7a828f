//! Expressions.
//!
//! Declaration checking never looks inside expressions; it only hands them to
//! the expression checker. The node set here covers initializers and bodies
//! well enough for a driver or a test harness to build and check them.

use crate::span::{Span, Spanned};
use crate::types::Ty;
use crate::ExprId;
use corvid_mem::Symbol;

/// An expression node. `ty` is filled in by the expression checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Expression shape
    pub kind: ExprKind,
    /// Source location
    pub span: Span,
    /// Type assigned by checking
    pub ty: Option<Ty>,
}

/// Expression shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`
    IntegerLiteral(i64),
    /// `4.2`
    FloatLiteral(f64),
    /// `true`
    BoolLiteral(bool),
    /// `"text"`
    StringLiteral(Symbol),
    /// Unqualified name
    DeclRef(Symbol),
    /// `callee(args...)`
    Call {
        /// Called expression
        callee: ExprId,
        /// Arguments
        args: Vec<ExprId>,
    },
    /// `(a, b)`
    Tuple(Vec<ExprId>),
    /// `{ a; b }`
    Block(Vec<ExprId>),
}

impl Expr {
    /// Creates an unchecked expression.
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: None,
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

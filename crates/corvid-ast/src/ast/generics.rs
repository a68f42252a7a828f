//! Generic parameter lists and requirements.

use super::ty::TypeLoc;
use crate::DeclId;
use crate::span::Span;

/// `<T: P, U requires T == U>` on a type, function or constructor.
///
/// Each parameter is a `TypeAlias` declaration whose inherited list holds its
/// written bounds and whose underlying type becomes its archetype.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericParamList {
    /// Parameter declarations in order
    pub params: Vec<DeclId>,
    /// Explicit `requires` clauses in order
    pub requirements: Vec<Requirement>,
    /// Location of the list
    pub span: Span,
}

impl GenericParamList {
    /// Creates a list without requirements.
    #[must_use]
    pub const fn new(params: Vec<DeclId>, span: Span) -> Self {
        Self {
            params,
            requirements: Vec::new(),
            span,
        }
    }
}

/// One `requires` clause.
///
/// Operands that fail to resolve are overwritten with the error type; the
/// requirement itself stays in the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// `subject : protocol`
    Conformance {
        /// Constrained type
        subject: TypeLoc,
        /// Protocol it must conform to
        protocol: TypeLoc,
        /// Source location
        span: Span,
    },

    /// `first == second`
    SameType {
        /// Left operand
        first: TypeLoc,
        /// Right operand
        second: TypeLoc,
        /// Source location
        span: Span,
    },
}

impl Requirement {
    /// Source location.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Requirement::Conformance { span, .. } | Requirement::SameType { span, .. } => *span,
        }
    }
}

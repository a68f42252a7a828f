//! Binding patterns.
//!
//! Patterns appear on the left of `var` bindings and as function, constructor
//! and subscript parameter lists. Only [`PatternKind::Named`] leaves introduce
//! variables; every other kind is structure.

use super::ty::TypeLoc;
use crate::span::{Span, Spanned};
use crate::types::Ty;
use crate::{DeclId, ExprId};

/// A pattern node. `ty` is filled in by the pattern checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Shape of the pattern
    pub kind: PatternKind,
    /// Source location
    pub span: Span,
    /// Type assigned by checking
    pub ty: Option<Ty>,
}

/// Pattern shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// `(a, b: Int = 0)`
    Tuple(Vec<TuplePatternElt>),

    /// `(a)`
    Paren(Box<Pattern>),

    /// `a: Int`
    Typed {
        /// Annotated sub-pattern
        sub: Box<Pattern>,
        /// Annotation
        loc: TypeLoc,
    },

    /// Binds the variable declared by the given `Var` declaration.
    Named(DeclId),

    /// `_`
    Any,
}

/// One element of a tuple pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct TuplePatternElt {
    /// Element pattern
    pub pattern: Pattern,
    /// Default value, for parameter lists
    pub init: Option<ExprId>,
}

impl Pattern {
    /// Creates an unchecked pattern.
    #[must_use]
    pub const fn new(kind: PatternKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: None,
        }
    }

    /// `name` with no annotation.
    #[must_use]
    pub const fn named(var: DeclId, span: Span) -> Self {
        Self::new(PatternKind::Named(var), span)
    }

    /// `sub: loc`.
    #[must_use]
    pub fn typed(sub: Pattern, loc: TypeLoc, span: Span) -> Self {
        Self::new(
            PatternKind::Typed {
                sub: Box::new(sub),
                loc,
            },
            span,
        )
    }

    /// Tuple of plain elements.
    #[must_use]
    pub fn tuple(elements: Vec<Pattern>, span: Span) -> Self {
        let elts = elements
            .into_iter()
            .map(|pattern| TuplePatternElt { pattern, init: None })
            .collect();
        Self::new(PatternKind::Tuple(elts), span)
    }

    /// Returns `true` if the outermost pattern, looking through parens, carries an annotation.
    #[must_use]
    pub fn is_typed(&self) -> bool {
        match &self.kind {
            PatternKind::Typed { .. } => true,
            PatternKind::Paren(inner) => inner.is_typed(),
            _ => false,
        }
    }

    /// Outermost annotation, looking through parens.
    pub fn type_loc_mut(&mut self) -> Option<&mut TypeLoc> {
        match &mut self.kind {
            PatternKind::Typed { loc, .. } => Some(loc),
            PatternKind::Paren(inner) => inner.type_loc_mut(),
            _ => None,
        }
    }

    /// Every variable this pattern binds, in source order.
    ///
    /// ```
    /// use corvid_ast::ast::pat::Pattern;
    /// use corvid_ast::span::Span;
    /// use corvid_mem::Idx;
    ///
    /// let a = Idx::from_raw(0);
    /// let b = Idx::from_raw(1);
    /// let pat = Pattern::tuple(vec![Pattern::named(a, Span::default()), Pattern::named(b, Span::default())], Span::default());
    /// assert_eq!(pat.bound_vars(), vec![a, b]);
    /// ```
    #[must_use]
    pub fn bound_vars(&self) -> Vec<DeclId> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, out: &mut Vec<DeclId>) {
        match &self.kind {
            PatternKind::Tuple(elts) => {
                for elt in elts {
                    elt.pattern.collect_vars(out);
                }
            }
            PatternKind::Paren(sub) | PatternKind::Typed { sub, .. } => sub.collect_vars(out),
            PatternKind::Named(var) => out.push(*var),
            PatternKind::Any => {}
        }
    }
}

impl Spanned for Pattern {
    fn span(&self) -> Span {
        self.span
    }
}

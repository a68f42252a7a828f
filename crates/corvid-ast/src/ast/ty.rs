//! Written type references.
//!
//! A [`TypeRepr`] is a type as spelled in source. A [`TypeLoc`] pairs the
//! spelling with the [`Ty`] it resolves to; the checker fills in `ty` and, on
//! failure, overwrites it with [`Ty::Error`] so nothing downstream tries to
//! resolve the same reference again.

use crate::span::{Span, Spanned};
use crate::types::Ty;
use corvid_mem::{StringInterner, Symbol};

/// Type as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRepr {
    /// Named type with optional generic arguments: `Int`, `Vector<T>`
    Named {
        /// Type name
        name: Symbol,
        /// Generic arguments
        args: Vec<TypeRepr>,
        /// Source location
        span: Span,
    },

    /// Tuple type: `(a: Int, Bool)`
    Tuple {
        /// Elements, optionally labelled
        elements: Vec<TupleReprElt>,
        /// Source location
        span: Span,
    },

    /// Function type: `Int -> Bool`
    Function {
        /// Parameter type
        input: Box<TypeRepr>,
        /// Result type
        result: Box<TypeRepr>,
        /// Source location
        span: Span,
    },

    /// By-reference parameter type: `[byref] Int`
    InOut {
        /// Referenced type
        inner: Box<TypeRepr>,
        /// Source location
        span: Span,
    },

    /// Protocol composition: `protocol<P, Q>`
    Composition {
        /// Composed protocols
        protocols: Vec<TypeRepr>,
        /// Source location
        span: Span,
    },
}

/// One element of a tuple type repr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleReprElt {
    /// Label
    pub name: Option<Symbol>,
    /// Element type
    pub ty: TypeRepr,
}

impl TypeRepr {
    /// Named type without generic arguments.
    #[must_use]
    pub const fn simple(name: Symbol, span: Span) -> Self {
        TypeRepr::Named {
            name,
            args: Vec::new(),
            span,
        }
    }

    /// Source-like spelling, for diagnostics about references that never resolved.
    #[must_use]
    pub fn render(&self, interner: &StringInterner) -> String {
        let list = |reprs: &[TypeRepr]| {
            reprs
                .iter()
                .map(|r| r.render(interner))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            TypeRepr::Named { name, args, .. } if args.is_empty() => interner.name(*name).to_string(),
            TypeRepr::Named { name, args, .. } => format!("{}<{}>", interner.name(*name), list(args)),
            TypeRepr::Tuple { elements, .. } => {
                let elts: Vec<String> = elements
                    .iter()
                    .map(|elt| match elt.name {
                        Some(label) => format!("{}: {}", interner.name(label), elt.ty.render(interner)),
                        None => elt.ty.render(interner),
                    })
                    .collect();
                format!("({})", elts.join(", "))
            }
            TypeRepr::Function { input, result, .. } => {
                format!("{} -> {}", input.render(interner), result.render(interner))
            }
            TypeRepr::InOut { inner, .. } => format!("[byref] {}", inner.render(interner)),
            TypeRepr::Composition { protocols, .. } => format!("protocol<{}>", list(protocols)),
        }
    }
}

impl Spanned for TypeRepr {
    fn span(&self) -> Span {
        match self {
            TypeRepr::Named { span, .. }
            | TypeRepr::Tuple { span, .. }
            | TypeRepr::Function { span, .. }
            | TypeRepr::InOut { span, .. }
            | TypeRepr::Composition { span, .. } => *span,
        }
    }
}

/// A type reference and its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLoc {
    /// Spelling, absent for compiler-synthesized references
    pub repr: Option<TypeRepr>,
    /// Resolution, absent until validated
    pub ty: Option<Ty>,
}

impl TypeLoc {
    /// Unresolved reference to `repr`.
    #[must_use]
    pub const fn new(repr: TypeRepr) -> Self {
        Self {
            repr: Some(repr),
            ty: None,
        }
    }

    /// Already-resolved reference with no spelling.
    #[must_use]
    pub const fn resolved(ty: Ty) -> Self {
        Self {
            repr: None,
            ty: Some(ty),
        }
    }

    /// Marks the reference as failed.
    pub fn set_invalid(&mut self) {
        self.ty = Some(Ty::Error);
    }

    /// Returns `true` if the reference resolved to a real type.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(&self.ty, Some(ty) if !ty.is_error())
    }

    /// Returns `true` if the reference was marked as failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.ty, Some(Ty::Error))
    }

    /// The resolved type, or [`Ty::Error`] when unresolved.
    #[must_use]
    pub fn ty_or_error(&self) -> Ty {
        self.ty.clone().unwrap_or(Ty::Error)
    }
}

impl Spanned for TypeLoc {
    fn span(&self) -> Span {
        self.repr.as_ref().map_or(Span::SYNTHESIZED, Spanned::span)
    }
}

//! Semantic types.
//!
//! A [`Ty`] is what a type reference resolves to. Declarations refer to
//! nominal types by [`DeclId`], generic parameters by [`ArchetypeId`], so a
//! `Ty` is cheap to clone and compare structurally.
//!
//! # Error type
//!
//! [`Ty::Error`] is the recovery marker. A declaration whose checking failed
//! gets `Ty::Error` rather than an empty slot, which lets later passes tell
//! "unknown" apart from `()`.

use crate::{ArchetypeId, DeclId, ModuleId};
use corvid_mem::Symbol;

/// Resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Recovery marker for anything that failed to resolve.
    Error,

    /// Built-in scalar type.
    Primitive(PrimTy),

    /// Tuple, possibly labelled. `()` is the empty tuple.
    Tuple(Vec<TupleElt>),

    /// Monomorphic function type `input -> result`.
    Function {
        /// Parameter type, usually a tuple
        input: Box<Ty>,
        /// Result type
        result: Box<Ty>,
    },

    /// Function type quantified over the generic parameters of `generic_owner`.
    PolymorphicFunction {
        /// Parameter type
        input: Box<Ty>,
        /// Result type
        result: Box<Ty>,
        /// Declaration whose generic parameter list binds the archetypes
        generic_owner: DeclId,
    },

    /// Assignable storage, the type of `byref` parameters.
    LValue(Box<Ty>),

    /// Oneof, struct or class type, possibly applied to generic arguments.
    Nominal {
        /// Which nominal flavour
        kind: NominalKind,
        /// The declaring type
        decl: DeclId,
        /// Generic arguments, empty for non-generic types
        args: Vec<Ty>,
    },

    /// Generic nominal type named without arguments, e.g. `Vector` for `struct Vector<T>`.
    UnboundGeneric {
        /// Which nominal flavour
        kind: NominalKind,
        /// The declaring type
        decl: DeclId,
    },

    /// Existential for a single protocol.
    Protocol(DeclId),

    /// Existential for several protocols at once.
    ProtocolComposition(Vec<Ty>),

    /// Placeholder for a generic parameter or associated type.
    Archetype(ArchetypeId),

    /// The value an `import` binds.
    Module(ModuleId),
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimTy {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Double,
    /// Boolean
    Bool,
    /// Unicode string
    String,
    /// Unicode scalar
    Char,
}

impl PrimTy {
    /// Source spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PrimTy::Int => "Int",
            PrimTy::Double => "Double",
            PrimTy::Bool => "Bool",
            PrimTy::String => "String",
            PrimTy::Char => "Char",
        }
    }

    /// Looks a primitive up by its source spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<PrimTy> {
        [PrimTy::Int, PrimTy::Double, PrimTy::Bool, PrimTy::String, PrimTy::Char]
            .into_iter()
            .find(|prim| prim.name() == name)
    }
}

/// The three nominal declaration kinds that own a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NominalKind {
    /// `oneof`
    OneOf,
    /// `struct`
    Struct,
    /// `class`
    Class,
}

/// One element of a tuple type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElt {
    /// Label, if any
    pub name: Option<Symbol>,
    /// Element type
    pub ty: Ty,
    /// Whether a default value exists for this element when used as a parameter
    pub has_default: bool,
}

impl TupleElt {
    /// Unlabelled element without a default.
    #[must_use]
    pub const fn unnamed(ty: Ty) -> Self {
        Self {
            name: None,
            ty,
            has_default: false,
        }
    }

    /// Labelled element without a default.
    #[must_use]
    pub const fn named(name: Symbol, ty: Ty) -> Self {
        Self {
            name: Some(name),
            ty,
            has_default: false,
        }
    }
}

impl Ty {
    /// The empty tuple `()`.
    #[must_use]
    pub const fn unit() -> Ty {
        Ty::Tuple(Vec::new())
    }

    /// `input -> result`.
    #[must_use]
    pub fn function(input: Ty, result: Ty) -> Ty {
        Ty::Function {
            input: Box::new(input),
            result: Box::new(result),
        }
    }

    /// Returns `true` for [`Ty::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Ty::Error)
    }

    /// Returns `true` for `()`.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self, Ty::Tuple(elts) if elts.is_empty())
    }

    /// Returns `true` for protocol and protocol-composition types.
    #[must_use]
    pub const fn is_existential(&self) -> bool {
        matches!(self, Ty::Protocol(_) | Ty::ProtocolComposition(_))
    }

    /// Protocols an existential type stands for, flattening nested compositions.
    ///
    /// Returns `None` for non-existential types.
    #[must_use]
    pub fn existential_protocols(&self) -> Option<Vec<DeclId>> {
        fn collect(ty: &Ty, out: &mut Vec<DeclId>) {
            match ty {
                Ty::Protocol(decl) => {
                    if !out.contains(decl) {
                        out.push(*decl);
                    }
                }
                Ty::ProtocolComposition(parts) => parts.iter().for_each(|p| collect(p, out)),
                _ => {}
            }
        }

        if !self.is_existential() {
            return None;
        }
        let mut protocols = Vec::new();
        collect(self, &mut protocols);
        Some(protocols)
    }

    /// Whether a value of this type can be stored in a variable.
    ///
    /// Lvalues are not; a tuple is materializable when all its elements are.
    #[must_use]
    pub fn is_materializable(&self) -> bool {
        match self {
            Ty::LValue(_) => false,
            Ty::Tuple(elts) => elts.iter().all(|elt| elt.ty.is_materializable()),
            _ => true,
        }
    }

    /// Parameter type of a function or polymorphic function.
    #[must_use]
    pub fn fn_input(&self) -> Option<&Ty> {
        match self {
            Ty::Function { input, .. } | Ty::PolymorphicFunction { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Result type of a function or polymorphic function.
    #[must_use]
    pub fn fn_result(&self) -> Option<&Ty> {
        match self {
            Ty::Function { result, .. } | Ty::PolymorphicFunction { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Elements of a tuple type.
    #[must_use]
    pub fn tuple_elements(&self) -> Option<&[TupleElt]> {
        match self {
            Ty::Tuple(elts) => Some(elts),
            _ => None,
        }
    }

    /// The nominal declaration behind this type, bound or unbound.
    #[must_use]
    pub const fn nominal_decl(&self) -> Option<(NominalKind, DeclId)> {
        match self {
            Ty::Nominal { kind, decl, .. } | Ty::UnboundGeneric { kind, decl } => {
                Some((*kind, *decl))
            }
            _ => None,
        }
    }
}

//! Declaration-level syntax tree.
//!
//! Nodes are plain data owned by [`AstContext`](crate::AstContext) arenas;
//! cross references are [`DeclId`](crate::DeclId) and
//! [`ExprId`](crate::ExprId) handles rather than pointers, so semantic passes
//! can annotate nodes in place.
//!
//! # Modules
//!
//! - [`decl`] - declarations, declaration contexts and modules
//! - [`pat`] - binding patterns
//! - [`expr`] - expressions
//! - [`ty`] - written type references
//! - [`generics`] - generic parameter lists and requirements
//! - [`attr`] - declaration attributes

pub mod attr;
pub mod decl;
pub mod expr;
pub mod generics;
pub mod pat;
pub mod ty;

pub use attr::{Associativity, Attributes, InfixData};
pub use decl::{Decl, DeclContext, DeclKind, FuncBody, Module, NominalDecl};
pub use expr::{Expr, ExprKind};
pub use generics::{GenericParamList, Requirement};
pub use pat::{Pattern, PatternKind, TuplePatternElt};
pub use ty::{TupleReprElt, TypeLoc, TypeRepr};

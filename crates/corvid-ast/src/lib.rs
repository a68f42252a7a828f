//! Corvid AST: declarations, semantic types and diagnostics.
//!
//! This crate holds everything the semantic passes share:
//! - Source locations ([`span`])
//! - Diagnostics ([`diagnostic`])
//! - The declaration-level syntax tree ([`ast`])
//! - Resolved types and archetypes ([`types`])
//! - The arena owner for a compilation session ([`AstContext`])
//!
//! # Example
//!
//! ```
//! use corvid_ast::ast::{Decl, DeclContext, DeclKind, NominalDecl};
//! use corvid_ast::span::Span;
//! use corvid_ast::AstContext;
//!
//! let mut ctx = AstContext::new();
//! let module = ctx.alloc_module("main");
//! let name = ctx.intern("Point");
//! let point = ctx.alloc_decl(Decl::new(
//!     DeclKind::Struct(NominalDecl::new(name)),
//!     DeclContext::Module(module),
//!     Span::point(0, 1, 1),
//! ));
//! ctx.add_to_module(module, point);
//!
//! assert_eq!(ctx.decl_name(point), "Point");
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod context;
pub mod diagnostic;
pub mod keywords;
pub mod span;
pub mod types;

pub use context::AstContext;
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticLevel};
pub use span::{Span, Spanned};

use corvid_mem::Idx;

/// Handle to a declaration.
pub type DeclId = Idx<ast::Decl>;

/// Handle to an expression.
pub type ExprId = Idx<ast::Expr>;

/// Handle to a module.
pub type ModuleId = Idx<ast::Module>;

/// Handle to an archetype.
pub type ArchetypeId = Idx<types::Archetype>;

//! Corvid declaration checker.
//!
//! This crate assigns a semantic type to every declaration of a module and
//! enforces the declaration-level rules of the language:
//! - Inheritance clauses name protocols
//! - Generic parameters and associated types get archetypes
//! - Variable bindings are typed from annotations or initializers
//! - Structs get a memberwise constructor
//! - Operator and conversion attributes fit the declaration they are on
//!
//! Type references, expressions, patterns and conformance proofs are
//! delegated to collaborators (see [`services`]).
//!
//! # Example
//!
//! ```no_run
//! use corvid_ast::AstContext;
//! use corvid_sema::{CheckOptions, SemaServices, TypeChecker};
//!
//! fn check<S: SemaServices>(ast: &mut AstContext, services: &mut S) {
//!     let module = ast.alloc_module("main");
//!     // ... parse declarations into `module` ...
//!     let mut checker = TypeChecker::with_options(ast, services, CheckOptions::from_env());
//!     checker.check_module(module);
//!     for err in checker.diagnostics() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod archetype;
pub mod check;
pub mod error;
pub mod options;
pub mod services;

pub use archetype::ArchetypeBuilder;
pub use check::{PassContext, TypeChecker};
pub use error::DeclError;
pub use options::{CheckOptions, UnitKind};
pub use services::{
    Checked, ConformanceProver, ExprChecker, ModuleLookup, Reported, SemaServices, TypeValidator,
};

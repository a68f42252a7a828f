//! Collaborators the declaration checker relies on.
//!
//! The checker resolves no type references, checks no expressions and
//! proves no conformances itself. It calls out through these traits:
//!
//! - [`TypeValidator`] - resolves a [`TypeLoc`] in place
//! - [`ExprChecker`] - checks expressions, patterns and function bodies
//! - [`ConformanceProver`] - proves a type conforms to a protocol
//! - [`ModuleLookup`] - finds declarations by name in another module
//!
//! A collaborator that fails has already reported the problem through its own
//! channel and returns [`Reported`]; the checker only recovers.
//!
//! Calls that resolve names carry the [`DeclContext`] they are written in.
//! Generic parameters and associated types are looked up from there
//! outwards (see [`AstContext::lookup_type_in_scope`]).

use corvid_ast::ast::{DeclContext, DeclKind, Pattern, TypeLoc};
use corvid_ast::types::Ty;
use corvid_ast::{AstContext, DeclId, ExprId, ModuleId, Span};
use corvid_mem::Symbol;

/// Proof that a failure was already diagnosed by whoever returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reported;

/// Result of a collaborator call.
pub type Checked<T> = Result<T, Reported>;

/// Resolves written types.
pub trait TypeValidator {
    /// Resolves `loc`, written in `scope`, and stores the result in `loc.ty`.
    ///
    /// On failure the validator reports the problem and returns [`Reported`];
    /// the caller marks the reference invalid.
    fn validate_type(
        &mut self,
        ast: &AstContext,
        scope: DeclContext,
        loc: &mut TypeLoc,
        is_first_pass: bool,
    ) -> Checked<()>;
}

/// Checks expressions and patterns.
pub trait ExprChecker {
    /// Checks `expr`, converting it to `expected` if given, and returns its type.
    fn type_check_expr(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        expr: ExprId,
        expected: Option<&Ty>,
    ) -> Checked<Ty>;

    /// Checks `pattern`, resolving annotations and typing the variables it binds.
    fn type_check_pattern(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        pattern: &mut Pattern,
        is_first_pass: bool,
    ) -> Checked<()>;

    /// Gives an unannotated `pattern` the type `ty`, typing the variables it binds.
    fn coerce_pattern(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        pattern: &mut Pattern,
        ty: &Ty,
        is_first_pass: bool,
    ) -> Checked<()>;

    /// Checks the signature and body of a function declaration and returns its type.
    ///
    /// Names in the signature are resolved from the function's own scope.
    fn check_function_body(
        &mut self,
        ast: &mut AstContext,
        func: DeclId,
        is_first_pass: bool,
    ) -> Checked<Ty>;

    /// Checks a top-level code declaration of a main unit.
    fn check_top_level_code(&mut self, ast: &mut AstContext, decl: DeclId) -> Checked<()> {
        let _ = (ast, decl);
        Ok(())
    }
}

/// Proves protocol conformance.
pub trait ConformanceProver {
    /// Returns whether `ty` conforms to `protocol`, reporting at `loc` if it does not.
    fn conforms_to_protocol(
        &mut self,
        ast: &AstContext,
        ty: &Ty,
        protocol: DeclId,
        loc: Span,
    ) -> bool;
}

/// Finds declarations in other modules.
pub trait ModuleLookup {
    /// Qualified lookup of `name` among the top-level declarations of `module`.
    fn lookup_value(&self, ast: &AstContext, module: ModuleId, name: Symbol) -> Vec<DeclId> {
        ast.modules[module]
            .decls
            .iter()
            .copied()
            .filter(|&decl| {
                let decl = ast.decl(decl);
                !matches!(decl.kind, DeclKind::Import { .. }) && decl.name() == Some(name)
            })
            .collect()
    }
}

/// Everything the checker needs, as one bound.
pub trait SemaServices: TypeValidator + ExprChecker + ConformanceProver + ModuleLookup {}

impl<T> SemaServices for T where T: TypeValidator + ExprChecker + ConformanceProver + ModuleLookup + ?Sized {}

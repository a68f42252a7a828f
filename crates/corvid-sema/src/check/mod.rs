//! Declaration checking.
//!
//! This module implements the declaration visitor:
//! - Pass bookkeeping ([`PassContext`])
//! - Per-kind visitors (`decl`)
//! - Variable bindings (`binding`)
//! - Generic parameter lists and archetypes (`generics`)
//! - Inheritance clauses and explicit conformance (`conformance`)
//! - Declaration attributes (`attr`)
//!
//! Module-scope declarations are visited twice. The first pass settles
//! everything a later declaration might refer to (signatures, inheritance,
//! archetypes); the second pass checks what needs the whole module in view
//! (deferred initializers, explicit conformances). Declarations below module
//! scope are visited once, with both passes' work done together.

mod attr;
mod binding;
mod conformance;
mod decl;
mod generics;

use crate::error::DeclError;
use crate::options::CheckOptions;
use crate::services::{Checked, Reported, SemaServices};
use corvid_ast::ast::{DeclContext, DeclKind, TypeLoc};
use corvid_ast::types::Ty;
use corvid_ast::{AstContext, DeclId, ModuleId};
use corvid_log::{debug, info, warn};

/// Which pass a declaration is being visited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassContext {
    /// Signature-level work only
    pub is_first_pass: bool,
    /// Second visit of a module-scope declaration
    pub is_second_pass: bool,
}

impl PassContext {
    /// Pass flags for a declaration living in `context`.
    ///
    /// Only module-scope declarations get a distinct second pass; anything
    /// nested is visited once with `is_first_pass` false.
    #[must_use]
    pub const fn new(is_first_pass: bool, context: DeclContext) -> Self {
        Self {
            is_first_pass,
            is_second_pass: !is_first_pass && context.is_module_scope(),
        }
    }

    /// Single visit that does both passes' work.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            is_first_pass: false,
            is_second_pass: false,
        }
    }
}

/// Declaration checker.
///
/// Holds the AST mutably for the duration of a check. Types it cannot work
/// out itself come from `services`; problems are collected as [`DeclError`]s.
pub struct TypeChecker<'a, S: SemaServices + ?Sized> {
    ast: &'a mut AstContext,
    services: &'a mut S,
    options: CheckOptions,
    diagnostics: Vec<DeclError>,
}

impl<'a, S: SemaServices + ?Sized> TypeChecker<'a, S> {
    /// Creates a checker for a library unit.
    pub fn new(ast: &'a mut AstContext, services: &'a mut S) -> Self {
        Self::with_options(ast, services, CheckOptions::default())
    }

    /// Creates a checker with explicit options.
    pub fn with_options(ast: &'a mut AstContext, services: &'a mut S, options: CheckOptions) -> Self {
        Self {
            ast,
            services,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> CheckOptions {
        self.options
    }

    /// The AST being checked.
    #[must_use]
    pub fn ast(&self) -> &AstContext {
        self.ast
    }

    /// Diagnostics reported so far, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[DeclError] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has been reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Consumes the checker, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<DeclError> {
        self.diagnostics
    }

    /// Checks one declaration in the given pass.
    ///
    /// For a module-scope declaration, call once with `is_first_pass` true
    /// and once with false. Anything nested is checked with a single call
    /// with `is_first_pass` false.
    ///
    /// # Panics
    ///
    /// Panics on top-level code, which is routed through
    /// [`ExprChecker::check_top_level_code`](crate::ExprChecker::check_top_level_code)
    /// by [`check_module`](Self::check_module) instead.
    pub fn type_check_decl(&mut self, decl: DeclId, is_first_pass: bool) {
        let pass = PassContext::new(is_first_pass, self.ast.decl(decl).context);
        self.visit(decl, pass);
    }

    /// Checks every declaration of `module`: all of them in the first pass,
    /// then all of them again in the second, in source order.
    pub fn check_module(&mut self, module: ModuleId) {
        let decls = self.ast.modules[module].decls.clone();
        info!(
            "checking module '{}' ({} declarations, {:?})",
            self.ast.name(self.ast.modules[module].name),
            decls.len(),
            self.options.unit_kind
        );

        for &decl in &decls {
            if !self.is_top_level_code(decl) {
                self.type_check_decl(decl, true);
            }
        }

        for &decl in &decls {
            if self.is_top_level_code(decl) {
                // Body errors are the expression checker's to report
                let _ = self.services.check_top_level_code(self.ast, decl);
            } else {
                self.type_check_decl(decl, false);
            }
        }

        info!(
            "module '{}' checked with {} diagnostic(s)",
            self.ast.name(self.ast.modules[module].name),
            self.diagnostics.len()
        );
    }

    fn is_top_level_code(&self, decl: DeclId) -> bool {
        matches!(self.ast.decl(decl).kind, DeclKind::TopLevelCode { .. })
    }

    /// Dispatches on the declaration kind.
    pub(crate) fn visit(&mut self, decl: DeclId, pass: PassContext) {
        debug!(
            "visit {} '{}' (first={}, second={})",
            self.ast.decl(decl).kind.describe(),
            self.decl_name(decl),
            pass.is_first_pass,
            pass.is_second_pass
        );

        match &self.ast.decl(decl).kind {
            DeclKind::Import { .. } => self.visit_import(decl),
            DeclKind::PatternBinding { .. } => self.visit_pattern_binding(decl, pass),
            DeclKind::Subscript { .. } => self.visit_subscript(decl, pass),
            DeclKind::TypeAlias { .. } => self.visit_type_alias(decl, pass),
            DeclKind::OneOf(_) | DeclKind::Struct(_) | DeclKind::Class(_) => {
                self.visit_nominal(decl, pass);
            }
            DeclKind::Protocol { .. } => self.visit_protocol(decl, pass),
            DeclKind::Var { .. } | DeclKind::MemberwiseInit { .. } => {}
            DeclKind::Func { .. } => self.visit_func(decl, pass),
            DeclKind::OneOfElement { .. } => self.visit_oneof_element(decl, pass),
            DeclKind::Extension { .. } => self.visit_extension(decl, pass),
            DeclKind::TopLevelCode { .. } => {
                unreachable!("top-level code is checked by the module driver")
            }
            DeclKind::Constructor { .. } => self.visit_constructor(decl, pass),
            DeclKind::Destructor { .. } => self.visit_destructor(decl, pass),
        }
    }

    /// Visits every member of a container in the container's pass.
    pub(crate) fn visit_members(&mut self, container: DeclId, pass: PassContext) {
        let members = self.ast.decl(container).kind.members().to_vec();
        for member in members {
            self.visit(member, pass);
        }
    }

    pub(crate) fn diagnose(&mut self, err: DeclError) {
        debug!("{} at {}: {err}", err.code(), err.span());
        self.diagnostics.push(err);
    }

    /// Resolves `loc`, written in `scope`, through the type validator.
    ///
    /// A reference that already resolved is left alone, and one already
    /// marked invalid fails again without calling out. On failure the
    /// reference is marked invalid.
    pub(crate) fn validate_type(
        &mut self,
        scope: DeclContext,
        loc: &mut TypeLoc,
        pass: PassContext,
    ) -> Checked<()> {
        match &loc.ty {
            Some(Ty::Error) => return Err(Reported),
            Some(_) => return Ok(()),
            None => {}
        }
        if loc.repr.is_none() {
            warn!("type reference with no spelling and no type; substituting error type");
            loc.set_invalid();
            return Err(Reported);
        }

        let result = self
            .services
            .validate_type(self.ast, scope, loc, pass.is_first_pass);
        if result.is_err() || loc.ty.is_none() {
            loc.set_invalid();
            return Err(Reported);
        }
        Ok(())
    }

    /// Stores `ty` as the type of `decl`.
    pub(crate) fn set_decl_ty(&mut self, decl: DeclId, ty: Ty) {
        self.ast.decl_mut(decl).ty = Some(ty);
    }

    /// Gives `decl` the error type if nothing has typed it yet.
    pub(crate) fn ensure_decl_ty(&mut self, decl: DeclId) {
        let slot = &mut self.ast.decl_mut(decl).ty;
        if slot.is_none() {
            warn!("declaration left untyped; substituting error type");
            *slot = Some(Ty::Error);
        }
    }

    /// Renders a type for a diagnostic.
    pub(crate) fn render(&self, ty: &Ty) -> String {
        ty.display(self.ast).to_string()
    }

    /// Renders a type reference for a diagnostic, resolved or not.
    pub(crate) fn render_loc(&self, loc: &TypeLoc) -> String {
        match (&loc.ty, &loc.repr) {
            (Some(ty), _) if !ty.is_error() => self.render(ty),
            (_, Some(repr)) => repr.render(&self.ast.interner),
            (Some(ty), None) => self.render(ty),
            (None, None) => "_".to_string(),
        }
    }

    pub(crate) fn decl_name(&self, decl: DeclId) -> &str {
        self.ast
            .decl(decl)
            .name()
            .map_or("_", |name| self.ast.name(name))
    }
}

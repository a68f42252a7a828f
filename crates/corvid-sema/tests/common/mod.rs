// Common test utilities for integration tests
//
// This module provides a small AST builder and a set of collaborator
// services that resolve names against the AST, for use across all
// integration tests.

#![allow(dead_code)]

use corvid_ast::ast::{
    Attributes, Decl, DeclContext, DeclKind, Expr, ExprKind, FuncBody, GenericParamList,
    NominalDecl, Pattern, PatternKind, TupleReprElt, TypeLoc, TypeRepr,
};
use corvid_ast::keywords::THIS_VALUE;
use corvid_ast::types::{PrimTy, TupleElt, Ty};
use corvid_ast::{AstContext, DeclId, ExprId, ModuleId, Span};
use corvid_mem::Symbol;
use corvid_sema::{
    CheckOptions, Checked, ConformanceProver, DeclError, ExprChecker, ModuleLookup, Reported,
    TypeChecker, TypeValidator,
};

/// Builds declarations into one module, giving each a distinct line.
pub struct Fixture {
    pub ast: AstContext,
    pub module: ModuleId,
    line: usize,
}

impl Fixture {
    pub fn new() -> Self {
        let mut ast = AstContext::new();
        let module = ast.alloc_module("test");
        Self {
            ast,
            module,
            line: 0,
        }
    }

    /// Next source location.
    pub fn span(&mut self) -> Span {
        self.line += 1;
        Span::new(self.line * 100, self.line * 100 + 10, self.line, 1, self.line, 11)
    }

    pub fn sym(&mut self, name: &str) -> Symbol {
        self.ast.intern(name)
    }

    pub fn ty(&mut self, name: &str) -> TypeRepr {
        let name = self.sym(name);
        let span = self.span();
        TypeRepr::simple(name, span)
    }

    pub fn generic_ty(&mut self, name: &str, args: Vec<TypeRepr>) -> TypeRepr {
        let name = self.sym(name);
        let span = self.span();
        TypeRepr::Named { name, args, span }
    }

    pub fn tuple_ty(&mut self, elements: &[(&str, TypeRepr)]) -> TypeRepr {
        let elements = elements
            .iter()
            .map(|(label, ty)| TupleReprElt {
                name: (!label.is_empty()).then(|| self.ast.intern(label)),
                ty: ty.clone(),
            })
            .collect();
        let span = self.span();
        TypeRepr::Tuple { elements, span }
    }

    pub fn byref_ty(&mut self, name: &str) -> TypeRepr {
        let inner = Box::new(self.ty(name));
        let span = self.span();
        TypeRepr::InOut { inner, span }
    }

    pub fn loc(&mut self, name: &str) -> TypeLoc {
        let repr = self.ty(name);
        TypeLoc::new(repr)
    }

    /// Allocates a declaration in `context` and links it into its parent.
    pub fn add(&mut self, context: DeclContext, kind: DeclKind) -> DeclId {
        self.add_with_attrs(context, kind, Attributes::default())
    }

    pub fn add_with_attrs(&mut self, context: DeclContext, kind: DeclKind, attrs: Attributes) -> DeclId {
        let span = self.span();
        let decl = self
            .ast
            .alloc_decl(Decl::new(kind, context, span).with_attrs(attrs));
        match context {
            DeclContext::Module(module) => self.ast.add_to_module(module, decl),
            DeclContext::Type(parent) => self.ast.add_member(parent, decl),
            DeclContext::Function(_) => {}
        }
        decl
    }

    pub fn top(&self) -> DeclContext {
        DeclContext::Module(self.module)
    }

    /// A variable not linked into any container.
    pub fn var(&mut self, context: DeclContext, name: &str) -> DeclId {
        let name = self.sym(name);
        let span = self.span();
        self.ast.alloc_decl(Decl::new(
            DeclKind::Var {
                name,
                computed: false,
                is_static: false,
            },
            context,
            span,
        ))
    }

    /// A stored property, linked into `parent`.
    pub fn property(&mut self, parent: DeclId, name: &str) -> DeclId {
        let name = self.sym(name);
        self.add(
            DeclContext::Type(parent),
            DeclKind::Var {
                name,
                computed: false,
                is_static: false,
            },
        )
    }

    /// Stored property with its binding, both linked into `parent`.
    pub fn stored(
        &mut self,
        parent: DeclId,
        name: &str,
        annotation: TypeRepr,
        is_static: bool,
    ) -> (DeclId, DeclId) {
        let context = DeclContext::Type(parent);
        let name = self.sym(name);
        let span = self.span();
        let pattern_var = self.ast.alloc_decl(Decl::new(
            DeclKind::Var {
                name,
                computed: false,
                is_static,
            },
            context,
            span,
        ));
        let pattern = Pattern::typed(
            Pattern::named(pattern_var, span),
            TypeLoc::new(annotation),
            span,
        );
        let binding = self.add(context, DeclKind::PatternBinding { pattern, init: None });
        self.ast.add_member(parent, pattern_var);
        (binding, pattern_var)
    }

    /// `var name: annotation = init` in `context`; returns the binding and its variable.
    pub fn binding(
        &mut self,
        context: DeclContext,
        name: &str,
        annotation: Option<TypeRepr>,
        init: Option<ExprId>,
    ) -> (DeclId, DeclId) {
        let var = self.var(context, name);
        let span = self.span();
        let pattern = match annotation {
            Some(repr) => Pattern::typed(Pattern::named(var, span), TypeLoc::new(repr), span),
            None => Pattern::named(var, span),
        };
        let binding = self.add(context, DeclKind::PatternBinding { pattern, init });
        (binding, var)
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        let span = self.span();
        self.ast.alloc_expr(Expr::new(ExprKind::IntegerLiteral(value), span))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        let span = self.span();
        self.ast.alloc_expr(Expr::new(ExprKind::BoolLiteral(value), span))
    }

    pub fn name_ref(&mut self, name: &str) -> ExprId {
        let name = self.sym(name);
        let span = self.span();
        self.ast.alloc_expr(Expr::new(ExprKind::DeclRef(name), span))
    }

    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        let span = self.span();
        self.ast.alloc_expr(Expr::new(ExprKind::Call { callee, args }, span))
    }

    pub fn nominal(&mut self, context: DeclContext, kind: fn(NominalDecl) -> DeclKind, name: &str) -> DeclId {
        let name = self.sym(name);
        self.add(context, kind(NominalDecl::new(name)))
    }

    pub fn protocol(&mut self, context: DeclContext, name: &str, inherited: Vec<TypeLoc>) -> DeclId {
        let name = self.sym(name);
        self.add(
            context,
            DeclKind::Protocol {
                name,
                inherited,
                members: Vec::new(),
            },
        )
    }

    /// `typealias name : bounds = underlying` in `context`.
    pub fn alias(
        &mut self,
        context: DeclContext,
        name: &str,
        underlying: Option<TypeRepr>,
        bounds: Vec<TypeLoc>,
    ) -> DeclId {
        let name = self.sym(name);
        self.add(
            context,
            DeclKind::TypeAlias {
                name,
                underlying: underlying.map(TypeLoc::new).unwrap_or_default(),
                inherited: bounds,
            },
        )
    }

    /// A generic parameter of `owner`, not linked into any member list.
    pub fn generic_param(&mut self, owner: DeclId, name: &str, bounds: Vec<TypeLoc>) -> DeclId {
        let name = self.sym(name);
        let span = self.span();
        let context = if self.ast.decl(owner).kind.as_nominal().is_some() {
            DeclContext::Type(owner)
        } else {
            DeclContext::Function(owner)
        };
        self.ast.alloc_decl(Decl::new(
            DeclKind::TypeAlias {
                name,
                underlying: TypeLoc::default(),
                inherited: bounds,
            },
            context,
            span,
        ))
    }

    pub fn set_generic_params(&mut self, owner: DeclId, list: GenericParamList) {
        if let Some(slot) = self.ast.decl_mut(owner).kind.generic_params_mut() {
            *slot = Some(list);
        }
    }

    /// Parameter clause `(label: Type, ...)`.
    pub fn params(&mut self, context: DeclContext, params: &[(&str, TypeRepr)]) -> Pattern {
        let span = self.span();
        let elements = params
            .iter()
            .map(|(name, repr)| {
                let var = self.var(context, name);
                Pattern::typed(Pattern::named(var, span), TypeLoc::new(repr.clone()), span)
            })
            .collect();
        Pattern::tuple(elements, span)
    }

    /// `func name(params) -> result`; instance methods get a `this` clause first.
    pub fn func(
        &mut self,
        context: DeclContext,
        name: &str,
        params: &[(&str, TypeRepr)],
        result: Option<TypeRepr>,
        attrs: Attributes,
    ) -> DeclId {
        self.func_with(context, name, false, params, result, attrs)
    }

    pub fn func_with(
        &mut self,
        context: DeclContext,
        name: &str,
        is_static: bool,
        params: &[(&str, TypeRepr)],
        result: Option<TypeRepr>,
        attrs: Attributes,
    ) -> DeclId {
        let mut clauses = Vec::new();
        if !is_static && context.as_type().is_some() {
            let span = self.span();
            let this = self.ast.alloc_decl(Decl::new(
                DeclKind::Var {
                    name: THIS_VALUE,
                    computed: false,
                    is_static: false,
                },
                context,
                span,
            ));
            clauses.push(Pattern::typed(
                Pattern::named(this, span),
                TypeLoc::default(),
                span,
            ));
        }
        clauses.push(self.params(context, params));

        let name = self.sym(name);
        self.add_with_attrs(
            context,
            DeclKind::Func {
                name,
                is_static,
                generic_params: None,
                body: FuncBody {
                    params: clauses,
                    result: result.map(TypeLoc::new).unwrap_or_default(),
                    body: None,
                },
            },
            attrs,
        )
    }

    pub fn decl_ty(&self, decl: DeclId) -> Option<&Ty> {
        self.ast.decl(decl).ty.as_ref()
    }

    pub fn check(&mut self, services: &mut MockServices) -> Vec<DeclError> {
        self.check_with(services, CheckOptions::library())
    }

    pub fn check_with(&mut self, services: &mut MockServices, options: CheckOptions) -> Vec<DeclError> {
        let mut checker = TypeChecker::with_options(&mut self.ast, services, options);
        checker.check_module(self.module);
        checker.into_diagnostics()
    }
}

pub fn int() -> Ty {
    Ty::Primitive(PrimTy::Int)
}

pub fn boolean() -> Ty {
    Ty::Primitive(PrimTy::Bool)
}

pub fn codes(errors: &[DeclError]) -> Vec<&'static str> {
    errors.iter().map(DeclError::code).collect()
}

/// Collaborators that resolve names against the AST itself.
#[derive(Default)]
pub struct MockServices {
    /// Every conformance question asked, in order
    pub conformance_calls: Vec<(Ty, DeclId)>,
    /// Protocols nothing conforms to
    pub rejected_protocols: Vec<DeclId>,
    /// Expected type passed with every expression check
    pub expected_types: Vec<Option<Ty>>,
    /// Number of type references resolved
    pub validations: usize,
    /// Top-level code declarations checked
    pub top_level: Vec<DeclId>,
}

impl MockServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `repr` as written in `scope`.
    ///
    /// Generic parameters and associated types are found by walking the
    /// scope outwards; anything else by name among the declarations at
    /// module scope.
    fn resolve(&self, ast: &AstContext, scope: DeclContext, repr: &TypeRepr) -> Option<Ty> {
        match repr {
            TypeRepr::Named { name, args, .. } => {
                let text = ast.name(*name);
                if let Some(prim) = PrimTy::from_name(text) {
                    return Some(Ty::Primitive(prim));
                }
                if let Some(local) = ast.lookup_type_in_scope(scope, *name) {
                    return match &ast.decl(local).kind {
                        DeclKind::TypeAlias { underlying, .. } => underlying.ty.clone(),
                        _ => None,
                    };
                }
                let (id, decl) = ast.decls.iter().find(|(_, decl)| {
                    decl.name() == Some(*name)
                        && decl.context.is_module_scope()
                        && matches!(
                            decl.kind,
                            DeclKind::OneOf(_)
                                | DeclKind::Struct(_)
                                | DeclKind::Class(_)
                                | DeclKind::Protocol { .. }
                                | DeclKind::TypeAlias { .. }
                        )
                })?;
                match &decl.kind {
                    DeclKind::Protocol { .. } => Some(Ty::Protocol(id)),
                    DeclKind::TypeAlias { underlying, .. } => underlying.ty.clone(),
                    _ if args.is_empty() => ast.declared_type(id),
                    kind => {
                        let (nominal_kind, _) = kind.as_nominal()?;
                        let args = args
                            .iter()
                            .map(|arg| self.resolve(ast, scope, arg))
                            .collect::<Option<Vec<_>>>()?;
                        Some(Ty::Nominal {
                            kind: nominal_kind,
                            decl: id,
                            args,
                        })
                    }
                }
            }
            TypeRepr::Tuple { elements, .. } => {
                let elements = elements
                    .iter()
                    .map(|elt| {
                        Some(TupleElt {
                            name: elt.name,
                            ty: self.resolve(ast, scope, &elt.ty)?,
                            has_default: false,
                        })
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(Ty::Tuple(elements))
            }
            TypeRepr::Function { input, result, .. } => Some(Ty::function(
                self.resolve(ast, scope, input)?,
                self.resolve(ast, scope, result)?,
            )),
            TypeRepr::InOut { inner, .. } => {
                Some(Ty::LValue(Box::new(self.resolve(ast, scope, inner)?)))
            }
            TypeRepr::Composition { protocols, .. } => {
                let protocols = protocols
                    .iter()
                    .map(|p| self.resolve(ast, scope, p))
                    .collect::<Option<Vec<_>>>()?;
                Some(Ty::ProtocolComposition(protocols))
            }
        }
    }

    fn check_pattern(&mut self, ast: &mut AstContext, scope: DeclContext, pattern: &mut Pattern) -> Checked<Ty> {
        let ty = match &mut pattern.kind {
            PatternKind::Typed { sub, loc } => {
                if loc.ty.is_none() {
                    self.validate_type(ast, scope, loc, false)?;
                }
                let ty = loc.ty_or_error();
                if ty.is_error() {
                    return Err(Reported);
                }
                self.coerce(ast, scope, sub, &ty)?;
                ty
            }
            PatternKind::Paren(inner) => self.check_pattern(ast, scope, inner)?,
            PatternKind::Tuple(elements) => {
                let mut elts = Vec::new();
                for element in elements.iter_mut() {
                    let ty = self.check_pattern(ast, scope, &mut element.pattern)?;
                    let name = element
                        .pattern
                        .bound_vars()
                        .first()
                        .and_then(|&var| ast.decl(var).name());
                    elts.push(TupleElt {
                        name,
                        ty,
                        has_default: element.init.is_some(),
                    });
                }
                Ty::Tuple(elts)
            }
            PatternKind::Named(var) => ast.decl(*var).ty.clone().ok_or(Reported)?,
            PatternKind::Any => return Err(Reported),
        };
        pattern.ty = Some(ty.clone());
        Ok(ty)
    }

    fn coerce(&mut self, ast: &mut AstContext, scope: DeclContext, pattern: &mut Pattern, ty: &Ty) -> Checked<()> {
        match &mut pattern.kind {
            PatternKind::Named(var) => ast.decl_mut(*var).ty = Some(ty.clone()),
            PatternKind::Paren(inner) => self.coerce(ast, scope, inner, ty)?,
            PatternKind::Typed { sub, loc } => {
                if loc.ty.is_none() {
                    self.validate_type(ast, scope, loc, false)?;
                }
                if loc.ty.as_ref() != Some(ty) {
                    return Err(Reported);
                }
                self.coerce(ast, scope, sub, ty)?;
            }
            PatternKind::Tuple(elements) => {
                let Some(elts) = ty.tuple_elements() else {
                    return Err(Reported);
                };
                if elts.len() != elements.len() {
                    return Err(Reported);
                }
                for (element, elt) in elements.iter_mut().zip(elts) {
                    self.coerce(ast, scope, &mut element.pattern, &elt.ty)?;
                }
            }
            PatternKind::Any => {}
        }
        pattern.ty = Some(ty.clone());
        Ok(())
    }

    /// Curried function type of the given parameter clauses and result.
    fn signature(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        params: &mut [Pattern],
        result: &mut TypeLoc,
    ) -> Checked<Ty> {
        let mut ty = if result.repr.is_none() && result.ty.is_none() {
            Ty::unit()
        } else {
            if result.ty.is_none() {
                self.validate_type(ast, scope, result, false)?;
            }
            result.ty_or_error()
        };
        for clause in params.iter_mut().rev() {
            let input = match &clause.ty {
                Some(input) => input.clone(),
                None => self.check_pattern(ast, scope, clause)?,
            };
            ty = Ty::function(input, ty);
        }
        Ok(ty)
    }

    fn infer(&mut self, ast: &mut AstContext, expr: ExprId) -> Checked<Ty> {
        let kind = ast.exprs[expr].kind.clone();
        let ty = match kind {
            ExprKind::IntegerLiteral(_) => Ty::Primitive(PrimTy::Int),
            ExprKind::FloatLiteral(_) => Ty::Primitive(PrimTy::Double),
            ExprKind::BoolLiteral(_) => Ty::Primitive(PrimTy::Bool),
            ExprKind::StringLiteral(_) => Ty::Primitive(PrimTy::String),
            ExprKind::DeclRef(name) => ast
                .decls
                .iter()
                .find(|(_, decl)| {
                    decl.name() == Some(name)
                        && matches!(decl.kind, DeclKind::Var { .. } | DeclKind::Func { .. })
                })
                .and_then(|(_, decl)| decl.ty.clone())
                .ok_or(Reported)?,
            ExprKind::Call { callee, args } => {
                for arg in args {
                    self.infer(ast, arg)?;
                }
                let callee = self.infer(ast, callee)?;
                callee.fn_result().cloned().ok_or(Reported)?
            }
            ExprKind::Tuple(elements) => {
                let mut elts = Vec::new();
                for element in elements {
                    elts.push(TupleElt::unnamed(self.infer(ast, element)?));
                }
                Ty::Tuple(elts)
            }
            ExprKind::Block(_) => Ty::unit(),
        };
        ast.exprs[expr].ty = Some(ty.clone());
        Ok(ty)
    }
}

impl TypeValidator for MockServices {
    fn validate_type(
        &mut self,
        ast: &AstContext,
        scope: DeclContext,
        loc: &mut TypeLoc,
        _is_first_pass: bool,
    ) -> Checked<()> {
        self.validations += 1;
        let repr = loc.repr.as_ref().ok_or(Reported)?;
        let ty = self.resolve(ast, scope, repr).ok_or(Reported)?;
        loc.ty = Some(ty);
        Ok(())
    }
}

impl ExprChecker for MockServices {
    fn type_check_expr(
        &mut self,
        ast: &mut AstContext,
        _scope: DeclContext,
        expr: ExprId,
        expected: Option<&Ty>,
    ) -> Checked<Ty> {
        self.expected_types.push(expected.cloned());
        let ty = self.infer(ast, expr)?;
        match expected {
            Some(expected) if *expected != ty && !expected.is_error() => Err(Reported),
            _ => Ok(ty),
        }
    }

    fn type_check_pattern(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        pattern: &mut Pattern,
        _is_first_pass: bool,
    ) -> Checked<()> {
        self.check_pattern(ast, scope, pattern).map(|_| ())
    }

    fn coerce_pattern(
        &mut self,
        ast: &mut AstContext,
        scope: DeclContext,
        pattern: &mut Pattern,
        ty: &Ty,
        _is_first_pass: bool,
    ) -> Checked<()> {
        self.coerce(ast, scope, pattern, ty)
    }

    fn check_function_body(&mut self, ast: &mut AstContext, func: DeclId, _is_first_pass: bool) -> Checked<Ty> {
        let DeclKind::Func { body, .. } = &mut ast.decl_mut(func).kind else {
            return Err(Reported);
        };
        let mut params = std::mem::take(&mut body.params);
        let mut result = std::mem::take(&mut body.result);

        let outcome = self.signature(ast, DeclContext::Function(func), &mut params, &mut result);

        if let DeclKind::Func { body, .. } = &mut ast.decl_mut(func).kind {
            body.params = params;
            body.result = result;
        }
        outcome
    }

    fn check_top_level_code(&mut self, _ast: &mut AstContext, decl: DeclId) -> Checked<()> {
        self.top_level.push(decl);
        Ok(())
    }
}

impl ConformanceProver for MockServices {
    fn conforms_to_protocol(&mut self, _ast: &AstContext, ty: &Ty, protocol: DeclId, _loc: Span) -> bool {
        self.conformance_calls.push((ty.clone(), protocol));
        !self.rejected_protocols.contains(&protocol)
    }
}

impl ModuleLookup for MockServices {}

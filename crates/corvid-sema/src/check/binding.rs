//! Variable bindings.
//!
//! When a binding's pattern and initializer get checked depends on where it
//! lives and which pass is running:
//!
//! | pass   | deferred | init | pattern      | action                                   |
//! |--------|----------|------|--------------|------------------------------------------|
//! | second | no       | yes  | has a type   | convert init to the pattern type         |
//! | second | no       | no   | any          | nothing left to do                       |
//! | any    | any      | yes  | annotated    | check pattern, then init against it      |
//! | any    | any      | yes  | unannotated  | infer init, then coerce pattern to it    |
//! | first  | no       | yes  | unannotated  | wait for the second pass                 |
//! | any    | no       | no   | any          | check pattern                            |
//! | first  | yes      | any  | any          | wait for the second pass                 |
//!
//! Rows with an initializer and "any" pass apply outside the first pass.
//! Bindings are deferred only at module scope of a main unit.

use super::{PassContext, TypeChecker};
use crate::error::DeclError;
use crate::services::SemaServices;
use corvid_ast::ast::{DeclContext, DeclKind, Pattern, PatternKind};
use corvid_ast::types::Ty;
use corvid_ast::{DeclId, ExprId, Span};
use corvid_log::{trace, warn};

/// What checking a binding's pattern and initializer amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingStep {
    /// Pattern is typed; its variables need their final checks.
    Bind,
    /// Initializer re-checked against an already-typed pattern.
    Settled,
    /// Checking failed and was reported.
    Failed,
    /// Nothing can be done in this pass.
    Pending,
}

impl<S: SemaServices + ?Sized> TypeChecker<'_, S> {
    pub(crate) fn visit_pattern_binding(&mut self, decl: DeclId, pass: PassContext) {
        let (scope, span) = {
            let d = self.ast.decl(decl);
            (d.context, d.span)
        };
        let deferred = self.options.defers_module_bindings() && scope.is_module_scope();

        let Some((mut pattern, mut init)) = self.take_binding(decl) else {
            return;
        };
        let step = self.check_binding(scope, &mut pattern, &mut init, span, pass, deferred);
        let vars = pattern.bound_vars();
        let pattern_ty = pattern.ty.clone();
        self.restore_binding(decl, pattern, init);

        trace!("binding step {step:?} for {} variable(s)", vars.len());
        match step {
            BindingStep::Pending => return,
            BindingStep::Settled => {}
            BindingStep::Bind => self.visit_bound_vars(&vars),
            BindingStep::Failed => {
                for &var in &vars {
                    self.ensure_decl_ty(var);
                }
            }
        }
        self.set_decl_ty(decl, pattern_ty.unwrap_or(Ty::Error));
    }

    fn check_binding(
        &mut self,
        scope: DeclContext,
        pattern: &mut Pattern,
        init: &mut Option<ExprId>,
        span: Span,
        pass: PassContext,
        deferred: bool,
    ) -> BindingStep {
        if pass.is_second_pass && !deferred {
            match (*init, pattern.ty.clone()) {
                (Some(expr), Some(dest)) => {
                    if self
                        .services
                        .type_check_expr(self.ast, scope, expr, Some(&dest))
                        .is_err()
                    {
                        let ty = self.render(&dest);
                        self.diagnose(DeclError::WhileConvertingVarInit { ty, span });
                        *init = None;
                    }
                    return BindingStep::Settled;
                }
                // Unannotated with an initializer: inferred below
                (Some(_), None) => {}
                (None, _) => return BindingStep::Settled,
            }
        }

        match *init {
            Some(expr) if !pass.is_first_pass => {
                if pattern.is_typed() {
                    if self
                        .services
                        .type_check_pattern(self.ast, scope, pattern, pass.is_first_pass)
                        .is_err()
                    {
                        return BindingStep::Failed;
                    }
                    let dest = pattern.ty.clone().unwrap_or(Ty::Error);
                    if self
                        .services
                        .type_check_expr(self.ast, scope, expr, Some(&dest))
                        .is_err()
                    {
                        let ty = self.render(&dest);
                        self.diagnose(DeclError::WhileConvertingVarInit { ty, span });
                        return BindingStep::Failed;
                    }
                } else {
                    let Ok(init_ty) = self.services.type_check_expr(self.ast, scope, expr, None) else {
                        return BindingStep::Failed;
                    };
                    if self
                        .services
                        .coerce_pattern(self.ast, scope, pattern, &init_ty, pass.is_first_pass)
                        .is_err()
                    {
                        return BindingStep::Failed;
                    }
                }
                BindingStep::Bind
            }
            _ if pass.is_first_pass && deferred => BindingStep::Pending,
            Some(_) if !pattern.is_typed() => BindingStep::Pending,
            _ => {
                if self
                    .services
                    .type_check_pattern(self.ast, scope, pattern, pass.is_first_pass)
                    .is_err()
                {
                    return BindingStep::Failed;
                }
                BindingStep::Bind
            }
        }
    }

    /// Final checks on each variable a binding introduced.
    fn visit_bound_vars(&mut self, vars: &[DeclId]) {
        for &var in vars {
            let ty = match self.ast.decl(var).ty.clone() {
                Some(ty) => ty,
                None => {
                    warn!(
                        "variable '{}' left untyped by its pattern; substituting error type",
                        self.decl_name(var)
                    );
                    self.set_decl_ty(var, Ty::Error);
                    Ty::Error
                }
            };

            if !ty.is_materializable() {
                let err = DeclError::VarTypeNotMaterializable {
                    ty: self.render(&ty),
                    span: self.ast.decl(var).span,
                };
                self.diagnose(err);
                self.set_decl_ty(var, Ty::Error);
            }

            self.validate_attributes(var);
        }
    }

    fn take_binding(&mut self, decl: DeclId) -> Option<(Pattern, Option<ExprId>)> {
        match &mut self.ast.decl_mut(decl).kind {
            DeclKind::PatternBinding { pattern, init } => {
                let placeholder = Pattern::new(PatternKind::Any, pattern.span);
                Some((std::mem::replace(pattern, placeholder), init.take()))
            }
            _ => None,
        }
    }

    fn restore_binding(&mut self, decl: DeclId, checked: Pattern, checked_init: Option<ExprId>) {
        if let DeclKind::PatternBinding { pattern, init } = &mut self.ast.decl_mut(decl).kind {
            *pattern = checked;
            *init = checked_init;
        }
    }
}

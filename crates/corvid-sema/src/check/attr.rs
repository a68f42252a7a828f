//! Declaration attribute validation.
//!
//! Runs once a declaration has its type, since most rules depend on how many
//! arguments an operator takes. An illegal attribute is diagnosed and
//! cleared so later stages never see it; the one exception is `assignment`
//! with a non-void result, which is diagnosed but kept.

use super::TypeChecker;
use crate::error::DeclError;
use crate::services::SemaServices;
use corvid_ast::ast::attr::is_operator_name;
use corvid_ast::ast::{DeclContext, DeclKind, InfixData};
use corvid_ast::types::Ty;
use corvid_ast::{DeclId, ModuleId};
use corvid_log::trace;
use corvid_mem::Symbol;

impl<S: SemaServices + ?Sized> TypeChecker<'_, S> {
    pub(crate) fn validate_attributes(&mut self, decl: DeclId) {
        let d = self.ast.decl(decl);
        let ty = d.ty_or_error();
        let span = d.span;
        let context = d.context;
        let is_func = matches!(d.kind, DeclKind::Func { .. });
        let is_instance_method = matches!(d.kind, DeclKind::Func { is_static: false, .. })
            && context.as_type().is_some();
        let name = d.name();
        let name_str = name.map_or("", |name| self.ast.name(name)).to_string();
        let is_operator = is_operator_name(&name_str);
        let mut attrs = d.attrs;

        let arity = ty
            .fn_input()
            .and_then(Ty::tuple_elements)
            .map(<[_]>::len);

        if is_operator {
            if !is_func {
                self.diagnose(DeclError::OperatorNotFunc { span });
                return;
            }
            if arity == Some(0) || arity.is_some_and(|n| n > 2) {
                self.diagnose(DeclError::InvalidArgCountForOperator { span });
                attrs.infix = None;
                self.ast.decl_mut(decl).attrs = attrs;
                return;
            }
            if arity == Some(1) && name_str == "&" {
                self.diagnose(DeclError::CustomOperatorAddressOf { span });
                return;
            }
        }

        if attrs.infix.is_some() {
            if !is_operator {
                self.diagnose(DeclError::InfixNotAnOperator { span });
                attrs.infix = None;
                self.ast.decl_mut(decl).attrs = attrs;
                return;
            }
            if arity != Some(2) {
                self.diagnose(DeclError::InvalidInfixInput { span: attrs.span });
                attrs.infix = None;
                self.ast.decl_mut(decl).attrs = attrs;
                return;
            }
        }

        if attrs.postfix {
            if !is_operator {
                self.diagnose(DeclError::PostfixNotAnOperator { span });
                attrs.postfix = false;
                self.ast.decl_mut(decl).attrs = attrs;
                return;
            }
            if arity != Some(1) {
                self.diagnose(DeclError::InvalidPostfixInput { span });
                attrs.postfix = false;
                self.ast.decl_mut(decl).attrs = attrs;
                return;
            }
        }

        if attrs.assignment {
            if !is_func || !is_operator {
                self.diagnose(DeclError::InvalidDeclAttribute {
                    attr: "assignment",
                    span,
                });
                attrs.assignment = false;
            } else if arity.is_none_or(|n| n < 1) {
                self.diagnose(DeclError::AssignmentWithoutByref { span });
                attrs.assignment = false;
            } else if !first_param(&ty).is_some_and(|param| matches!(param, Ty::LValue(_))) {
                self.diagnose(DeclError::AssignmentWithoutByref { span });
                attrs.assignment = false;
            } else if let Some(result) = ty.fn_result().filter(|result| !result.is_unit()) {
                let ty = self.render(result);
                self.diagnose(DeclError::AssignmentNonVoid { ty, span });
            }
        }

        if attrs.conversion {
            if !is_instance_method {
                self.diagnose(DeclError::ConversionNotInstanceMethod {
                    name: name_str.clone(),
                    span,
                });
                attrs.conversion = false;
            } else if !ty.is_error() && !is_nullary_conversion(&ty) {
                self.diagnose(DeclError::ConversionParams {
                    name: name_str.clone(),
                    span,
                });
                attrs.conversion = false;
            }
        }

        // Binary operators without their own fixity take it from a
        // same-named declaration in scope
        if is_operator && attrs.infix.is_none() && arity != Some(1) {
            if let (DeclContext::Module(module), Some(name)) = (context, name) {
                attrs.infix = self.inherited_fixity(decl, module, name);
            }
            if attrs.infix.is_none() {
                self.diagnose(DeclError::BinopsInfixLeft { span });
            }
        }

        if attrs.byref {
            self.diagnose(DeclError::InvalidDeclAttribute { attr: "byref", span });
            attrs.byref = false;
        }
        if attrs.auto_closure {
            self.diagnose(DeclError::InvalidDeclAttribute {
                attr: "auto_closure",
                span,
            });
            attrs.auto_closure = false;
        }

        self.ast.decl_mut(decl).attrs = attrs;
    }

    /// Fixity of another declaration named `name`, searching `module` first
    /// and then the modules it imports, in import order.
    fn inherited_fixity(&self, decl: DeclId, module: ModuleId, name: Symbol) -> Option<InfixData> {
        let local = self.ast.modules[module]
            .decls
            .iter()
            .filter(|&&other| other != decl)
            .map(|&other| self.ast.decl(other))
            .find(|other| other.name() == Some(name) && other.attrs.infix.is_some())
            .and_then(|other| other.attrs.infix);
        if local.is_some() {
            trace!("'{}' takes its fixity from this module", self.ast.name(name));
            return local;
        }

        for imported in self.ast.imported_modules(module) {
            let found = self
                .services
                .lookup_value(self.ast, imported, name)
                .into_iter()
                .map(|other| self.ast.decl(other))
                .find(|other| other.name() == Some(name) && other.attrs.infix.is_some())
                .and_then(|other| other.attrs.infix);
            if found.is_some() {
                trace!(
                    "'{}' takes its fixity from module '{}'",
                    self.ast.name(name),
                    self.ast.name(self.ast.modules[imported].name)
                );
                return found;
            }
        }
        None
    }
}

/// First parameter of a function type, looking into a tuple input.
fn first_param(ty: &Ty) -> Option<&Ty> {
    let input = ty.fn_input()?;
    match input.tuple_elements() {
        Some(elements) => elements.first().map(|elt| &elt.ty),
        None => Some(input),
    }
}

/// Whether a curried method type `This -> Args -> R` can be called with no
/// arguments once bound.
fn is_nullary_conversion(ty: &Ty) -> bool {
    ty.fn_result()
        .and_then(Ty::fn_input)
        .and_then(Ty::tuple_elements)
        .is_some_and(|elements| elements.iter().all(|elt| elt.has_default))
}

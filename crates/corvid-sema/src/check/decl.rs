//! Per-kind declaration visitors.
//!
//! Each visitor receives the pass flags of the declaration being checked.
//! Members of a type, protocol or extension are visited with their
//! container's flags, so a member of a module-scope struct also sees the
//! second pass.

use super::{PassContext, TypeChecker};
use crate::error::DeclError;
use crate::services::SemaServices;
use corvid_ast::ast::{Decl, DeclContext, DeclKind, Pattern, PatternKind, TypeLoc};
use corvid_ast::keywords::THIS_TYPE;
use corvid_ast::types::{Archetype, TupleElt, Ty};
use corvid_ast::DeclId;
use corvid_log::trace;

impl<S: SemaServices + ?Sized> TypeChecker<'_, S> {
    pub(crate) fn visit_import(&mut self, decl: DeclId) {
        let ty = match &self.ast.decl(decl).kind {
            DeclKind::Import {
                module: Some(module),
                ..
            } => Ty::Module(*module),
            _ => Ty::Error,
        };
        self.set_decl_ty(decl, ty);
    }

    pub(crate) fn visit_subscript(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        let (context, span) = {
            let d = self.ast.decl(decl);
            (d.context, d.span)
        };
        if !self.ast.is_type_context(context) {
            self.diagnose(DeclError::SubscriptNotMember { span });
        }

        let DeclKind::Subscript { indices, element } = &mut self.ast.decl_mut(decl).kind else {
            return;
        };
        let mut element = std::mem::take(element);
        let mut indices = std::mem::replace(indices, Pattern::new(PatternKind::Any, span));

        let _ = self.validate_type(context, &mut element, pass);
        let indices_ok = self
            .services
            .type_check_pattern(self.ast, context, &mut indices, pass.is_first_pass)
            .is_ok();

        let ty = if indices_ok {
            Ty::function(indices.ty.clone().unwrap_or(Ty::Error), element.ty_or_error())
        } else {
            Ty::Error
        };

        if let DeclKind::Subscript {
            indices: slot_indices,
            element: slot_element,
        } = &mut self.ast.decl_mut(decl).kind
        {
            *slot_indices = indices;
            *slot_element = element;
        }
        self.set_decl_ty(decl, ty);
    }

    pub(crate) fn visit_type_alias(&mut self, decl: DeclId, pass: PassContext) {
        if !pass.is_second_pass {
            if let Some(mut underlying) = self.take_underlying(decl) {
                let scope = self.ast.decl(decl).context;
                let _ = self.validate_type(scope, &mut underlying, pass);
                self.restore_underlying(decl, underlying);
            }

            let in_protocol = self.parent_is(decl, |kind| matches!(kind, DeclKind::Protocol { .. }));
            if !in_protocol {
                self.check_inherited(decl, pass);
            }
        }

        let ty = match &self.ast.decl(decl).kind {
            DeclKind::TypeAlias { underlying, .. } => underlying.ty_or_error(),
            _ => Ty::Error,
        };
        self.set_decl_ty(decl, ty.clone());

        if !pass.is_first_pass {
            self.check_explicit_conformance(decl, &ty);
        }
    }

    /// Oneofs, structs and classes.
    pub(crate) fn visit_nominal(&mut self, decl: DeclId, pass: PassContext) {
        if !pass.is_second_pass {
            self.check_inherited(decl, pass);
            self.check_generic_params(decl, pass);
            let declared = self.ast.declared_type(decl).unwrap_or(Ty::Error);
            self.set_decl_ty(decl, declared);
        }

        self.visit_members(decl, pass);

        // Stored properties inferred from their initializer are only typed
        // in the second pass
        let is_struct = matches!(self.ast.decl(decl).kind, DeclKind::Struct(_));
        if is_struct && (!pass.is_second_pass || self.memberwise_init_is_stale(decl)) {
            self.synthesize_memberwise_init(decl);
        }

        if !pass.is_first_pass {
            let declared = self.ast.declared_type(decl).unwrap_or(Ty::Error);
            self.check_explicit_conformance(decl, &declared);
        }
    }

    /// Types the implicit constructor of a struct from its stored properties.
    ///
    /// The constructor takes a tuple labelled with the stored properties'
    /// names, in declaration order, and returns the struct as seen from its
    /// own body. An existing memberwise constructor node is reused; otherwise
    /// one is appended to the members.
    fn synthesize_memberwise_init(&mut self, decl: DeclId) {
        let members = self.ast.decl(decl).kind.members().to_vec();

        let mut elements = Vec::new();
        let mut existing = None;
        for &member in &members {
            let m = self.ast.decl(member);
            match m.kind {
                DeclKind::Var {
                    name,
                    computed: false,
                    is_static: false,
                } => elements.push(TupleElt::named(name, m.ty_or_error())),
                DeclKind::MemberwiseInit { .. } if existing.is_none() => existing = Some(member),
                _ => {}
            }
        }

        let argument = Ty::Tuple(elements);
        let result = self
            .ast
            .declared_type_in_context(decl)
            .unwrap_or(Ty::Error);
        let ty = Ty::function(argument.clone(), result);

        let init = match existing {
            Some(init) => init,
            None => {
                let span = self.ast.decl(decl).span;
                let init = self.ast.alloc_decl(Decl::new(
                    DeclKind::MemberwiseInit { argument: None },
                    DeclContext::Type(decl),
                    span,
                ));
                self.ast.add_member(decl, init);
                init
            }
        };
        trace!(
            "memberwise constructor of '{}': {}",
            self.decl_name(decl),
            self.render(&ty)
        );

        let init_decl = self.ast.decl_mut(init);
        if let DeclKind::MemberwiseInit { argument: slot } = &mut init_decl.kind {
            *slot = Some(TypeLoc::resolved(argument));
        }
        init_decl.ty = Some(ty);
    }

    /// Whether the memberwise constructor was typed before every stored
    /// property had a type.
    fn memberwise_init_is_stale(&self, decl: DeclId) -> bool {
        self.ast
            .decl(decl)
            .kind
            .members()
            .iter()
            .any(|&member| match &self.ast.decl(member).kind {
                DeclKind::MemberwiseInit {
                    argument: Some(argument),
                } => argument
                    .ty
                    .as_ref()
                    .and_then(Ty::tuple_elements)
                    .is_some_and(|elts| elts.iter().any(|elt| elt.ty.is_error())),
                _ => false,
            })
    }

    pub(crate) fn visit_protocol(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        self.check_inherited(decl, pass);
        self.set_decl_ty(decl, Ty::Protocol(decl));

        // Associated types, `This` included, become archetypes before any
        // requirement that mentions them is visited
        let members = self.ast.decl(decl).kind.members().to_vec();
        for &member in &members {
            if !matches!(self.ast.decl(member).kind, DeclKind::TypeAlias { .. }) {
                continue;
            }
            self.check_inherited(member, pass);

            let (name, bounds, existing) = match &self.ast.decl(member).kind {
                DeclKind::TypeAlias {
                    name,
                    underlying,
                    inherited,
                } => (
                    *name,
                    inherited
                        .iter()
                        .filter_map(|loc| loc.ty.clone())
                        .filter(Ty::is_existential)
                        .collect::<Vec<_>>(),
                    match underlying.ty {
                        Some(Ty::Archetype(id)) => Some(id),
                        _ => None,
                    },
                ),
                _ => continue,
            };

            let archetype = existing.unwrap_or_else(|| {
                let index = (name == THIS_TYPE).then_some(0);
                self.ast.alloc_archetype(Archetype::new(name, index, bounds))
            });
            trace!(
                "associated type '{}' bound to archetype {archetype:?}",
                self.ast.name(name)
            );
            self.set_alias_underlying(member, Ty::Archetype(archetype));
        }

        self.visit_members(decl, pass);
    }

    pub(crate) fn visit_func(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        let (context, is_static) = match &self.ast.decl(decl).kind {
            DeclKind::Func { is_static, .. } => (self.ast.decl(decl).context, *is_static),
            _ => return,
        };
        if !is_static && self.ast.is_type_context(context) {
            let this = self.ast.this_type(context).unwrap_or(Ty::Error);
            self.bind_this_param(decl, this);
        }

        self.check_generic_params(decl, pass);

        let ty = self
            .services
            .check_function_body(self.ast, decl, pass.is_first_pass)
            .unwrap_or(Ty::Error);
        self.set_decl_ty(decl, ty);

        self.validate_attributes(decl);
    }

    /// Gives the `this` clause of an instance method its type.
    ///
    /// # Panics
    ///
    /// Panics if the method has no parameter clause, if the first clause is
    /// not annotated, or if it already carries a different type.
    fn bind_this_param(&mut self, decl: DeclId, this: Ty) {
        let DeclKind::Func { body, .. } = &mut self.ast.decl_mut(decl).kind else {
            return;
        };
        let Some(param) = body.params.first_mut() else {
            panic!("instance method without a 'this' parameter clause");
        };

        if let Some(existing) = &param.ty {
            assert_eq!(existing, &this, "'this' parameter retyped");
            return;
        }

        let PatternKind::Typed { sub, loc } = &mut param.kind else {
            panic!("'this' parameter clause must be annotated");
        };
        loc.ty = Some(this.clone());
        let var = match sub.kind {
            PatternKind::Named(var) => Some(var),
            _ => None,
        };
        sub.ty = Some(this.clone());
        param.ty = Some(this.clone());

        if let Some(var) = var {
            self.set_decl_ty(var, this);
        }
    }

    pub(crate) fn visit_oneof_element(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        let Some(parent) = self.ast.decl(decl).context.as_type() else {
            return;
        };
        if !matches!(self.ast.decl(parent).kind, DeclKind::OneOf(_)) {
            return;
        }
        let oneof = self
            .ast
            .declared_type_in_context(parent)
            .unwrap_or(Ty::Error);

        let argument = match &mut self.ast.decl_mut(decl).kind {
            DeclKind::OneOfElement { argument, .. } => argument.take(),
            _ => None,
        };
        let Some(mut argument) = argument else {
            self.set_decl_ty(decl, oneof);
            return;
        };

        let scope = self.ast.decl(decl).context;
        let validated = self.validate_type(scope, &mut argument, pass);
        let payload = argument.ty_or_error();
        if let DeclKind::OneOfElement { argument: slot, .. } = &mut self.ast.decl_mut(decl).kind {
            *slot = Some(argument);
        }
        if validated.is_err() {
            self.set_decl_ty(decl, Ty::Error);
            return;
        }

        if !payload.is_materializable() {
            let span = self.ast.decl(decl).span;
            self.diagnose(DeclError::OneOfElementNotMaterializable { span });
        }
        self.set_decl_ty(decl, Ty::function(payload, oneof));
    }

    pub(crate) fn visit_extension(&mut self, decl: DeclId, pass: PassContext) {
        if !pass.is_second_pass {
            // The extended type is named from outside the extension
            let mut extended = self.take_extended(decl);
            let scope = self.ast.decl(decl).context;
            let _ = self.validate_type(scope, &mut extended, pass);
            let extended_ty = extended.ty_or_error();
            self.restore_extended(decl, extended);

            if !is_extensible(&extended_ty) {
                let err = DeclError::NonNominalExtension {
                    is_protocol: matches!(extended_ty, Ty::Protocol(_)),
                    ty: self.render(&extended_ty),
                    span: self.ast.decl(decl).span,
                };
                self.diagnose(err);
            }
            self.set_decl_ty(decl, extended_ty);
            self.check_inherited(decl, pass);
        }

        self.visit_members(decl, pass);

        if !pass.is_first_pass {
            let extended = match &self.ast.decl(decl).kind {
                DeclKind::Extension { extended, .. } => extended.ty_or_error(),
                _ => Ty::Error,
            };
            self.check_explicit_conformance(decl, &extended);
        }
    }

    pub(crate) fn visit_constructor(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        let (context, span) = {
            let d = self.ast.decl(decl);
            (d.context, d.span)
        };
        if !self.ast.is_type_context(context) {
            self.diagnose(DeclError::ConstructorNotMember { span });
        }

        self.check_generic_params(decl, pass);

        let this = self.ast.this_type(context).unwrap_or(Ty::Error);
        let DeclKind::Constructor {
            arguments,
            implicit_self,
            generic_params,
            ..
        } = &mut self.ast.decl_mut(decl).kind
        else {
            return;
        };
        let implicit_self = *implicit_self;
        let is_generic = generic_params.is_some();
        let mut arguments = std::mem::replace(arguments, Pattern::new(PatternKind::Any, span));
        self.set_decl_ty(implicit_self, this.clone());

        let checked = self.services.type_check_pattern(
            self.ast,
            DeclContext::Function(decl),
            &mut arguments,
            pass.is_first_pass,
        );
        let input = arguments.ty.clone().unwrap_or(Ty::Error);
        if let DeclKind::Constructor { arguments: slot, .. } = &mut self.ast.decl_mut(decl).kind {
            *slot = arguments;
        }

        let ty = match checked {
            Err(_) => Ty::Error,
            Ok(()) if is_generic => Ty::PolymorphicFunction {
                input: Box::new(input),
                result: Box::new(this),
                generic_owner: decl,
            },
            Ok(()) => Ty::function(input, this),
        };
        self.set_decl_ty(decl, ty);

        self.validate_attributes(decl);
    }

    pub(crate) fn visit_destructor(&mut self, decl: DeclId, pass: PassContext) {
        if pass.is_second_pass {
            return;
        }

        let (context, span) = {
            let d = self.ast.decl(decl);
            (d.context, d.span)
        };
        let in_class = context
            .as_type()
            .is_some_and(|parent| matches!(self.ast.decl(parent).kind, DeclKind::Class(_)));
        if !in_class {
            self.diagnose(DeclError::DestructorNotMember { span });
        }

        let this = self.ast.this_type(context).unwrap_or(Ty::Error);
        if let DeclKind::Destructor { implicit_self, .. } = self.ast.decl(decl).kind {
            self.set_decl_ty(implicit_self, this.clone());
        }
        self.set_decl_ty(decl, Ty::function(this, Ty::unit()));

        self.validate_attributes(decl);
    }

    fn parent_is(&self, decl: DeclId, pred: impl Fn(&DeclKind) -> bool) -> bool {
        self.ast
            .decl(decl)
            .context
            .as_type()
            .is_some_and(|parent| pred(&self.ast.decl(parent).kind))
    }

    fn take_underlying(&mut self, decl: DeclId) -> Option<TypeLoc> {
        match &mut self.ast.decl_mut(decl).kind {
            DeclKind::TypeAlias { underlying, .. } => Some(std::mem::take(underlying)),
            _ => None,
        }
    }

    fn take_extended(&mut self, decl: DeclId) -> TypeLoc {
        match &mut self.ast.decl_mut(decl).kind {
            DeclKind::Extension { extended, .. } => std::mem::take(extended),
            _ => TypeLoc::default(),
        }
    }

    fn restore_extended(&mut self, decl: DeclId, loc: TypeLoc) {
        if let DeclKind::Extension { extended, .. } = &mut self.ast.decl_mut(decl).kind {
            *extended = loc;
        }
    }

    fn restore_underlying(&mut self, decl: DeclId, loc: TypeLoc) {
        if let DeclKind::TypeAlias { underlying, .. } = &mut self.ast.decl_mut(decl).kind {
            *underlying = loc;
        }
    }
}

/// Whether an extension of `ty` is legal.
///
/// Oneofs, structs and classes can be extended, generic ones only unbound.
/// A type that already failed to resolve is let through.
fn is_extensible(ty: &Ty) -> bool {
    match ty {
        Ty::Nominal { args, .. } => args.is_empty(),
        Ty::UnboundGeneric { .. } | Ty::Error => true,
        _ => false,
    }
}

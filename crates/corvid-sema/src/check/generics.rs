//! Generic parameter lists.

use super::{PassContext, TypeChecker};
use crate::archetype::ArchetypeBuilder;
use crate::error::DeclError;
use crate::services::SemaServices;
use corvid_ast::ast::{DeclKind, Requirement, TypeLoc};
use corvid_ast::types::Ty;
use corvid_ast::DeclId;
use corvid_log::trace;

impl<S: SemaServices + ?Sized> TypeChecker<'_, S> {
    /// Checks the generic parameter list of `owner`, if it has one, and gives
    /// every parameter its archetype.
    ///
    /// Requirements are looked at twice. The protocol side of each
    /// conformance is resolved before archetypes exist, since it may not
    /// mention the parameters. The subject side and both sides of a
    /// same-type requirement are resolved afterwards, once the parameters
    /// have types to resolve to.
    ///
    /// The parameters stay in place while this runs, so requirements that
    /// name them resolve from the owner's scope.
    pub(crate) fn check_generic_params(&mut self, owner: DeclId, pass: PassContext) {
        let Some(list) = self.ast.decl(owner).kind.generic_params() else {
            return;
        };
        let params = list.params.clone();
        let span = list.span;
        let mut requirements = self.take_requirements(owner);
        let scope = self.ast.scope_of(owner);
        let mut builder = ArchetypeBuilder::new();

        // Parameters, with their written bounds
        for (index, &param) in params.iter().enumerate() {
            self.check_inherited(param, pass);
            builder.add_generic_parameter(self.ast, param, index as u32);
        }

        // Protocol side of conformance requirements
        for requirement in &mut requirements {
            if let Requirement::Conformance {
                subject, protocol, ..
            } = requirement
            {
                if self.validate_type(scope, protocol, pass).is_ok() {
                    let ty = protocol.ty_or_error();
                    if !ty.is_existential() {
                        let err = DeclError::RequiresConformanceNonProtocol {
                            subject: self.render_loc(subject),
                            protocol: self.render(&ty),
                            span,
                        };
                        self.diagnose(err);
                        protocol.set_invalid();
                    }
                }
            }
            builder.add_requirement(self.ast, requirement);
        }

        for (alias, archetype) in builder.assign_archetypes(self.ast) {
            trace!("generic parameter '{}' bound to archetype {archetype:?}", self.ast.decl_name(alias));
            self.set_alias_underlying(alias, Ty::Archetype(archetype));
        }

        // Remaining operands, now that the parameters resolve
        for requirement in &mut requirements {
            match requirement {
                Requirement::Conformance { subject, .. } => {
                    let _ = self.validate_type(scope, subject, pass);
                }
                Requirement::SameType { first, second, .. } => {
                    let _ = self.validate_type(scope, first, pass);
                    let _ = self.validate_type(scope, second, pass);
                }
            }
            builder.record_requirement(requirement);
        }

        self.restore_requirements(owner, requirements);
    }

    /// Makes `ty` the underlying type of the type alias `alias`, and its type.
    pub(crate) fn set_alias_underlying(&mut self, alias: DeclId, ty: Ty) {
        let decl = self.ast.decl_mut(alias);
        if let DeclKind::TypeAlias { underlying, .. } = &mut decl.kind {
            *underlying = TypeLoc::resolved(ty.clone());
        }
        decl.ty = Some(ty);
    }

    fn take_requirements(&mut self, owner: DeclId) -> Vec<Requirement> {
        match self.ast.decl_mut(owner).kind.generic_params_mut() {
            Some(Some(list)) => std::mem::take(&mut list.requirements),
            _ => Vec::new(),
        }
    }

    fn restore_requirements(&mut self, owner: DeclId, requirements: Vec<Requirement>) {
        if let Some(Some(list)) = self.ast.decl_mut(owner).kind.generic_params_mut() {
            list.requirements = requirements;
        }
    }
}

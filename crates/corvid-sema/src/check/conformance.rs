//! Inheritance clauses and explicit conformance.

use super::{PassContext, TypeChecker};
use crate::error::DeclError;
use crate::services::SemaServices;
use corvid_ast::ast::TypeLoc;
use corvid_ast::types::Ty;
use corvid_ast::DeclId;
use corvid_log::debug;

impl<S: SemaServices + ?Sized> TypeChecker<'_, S> {
    /// Validates the inherited list of `decl`, from the scope it opens.
    ///
    /// Entries that fail to resolve become the error type. Entries that
    /// resolve to something other than a protocol or protocol composition are
    /// diagnosed but kept.
    pub(crate) fn check_inherited(&mut self, decl: DeclId, pass: PassContext) {
        let mut inherited = self.take_inherited(decl);
        let span = self.ast.decl(decl).span;
        let scope = self.ast.scope_of(decl);

        for loc in &mut inherited {
            if self.validate_type(scope, loc, pass).is_err() {
                continue;
            }
            let ty = loc.ty_or_error();
            if !ty.is_existential() && !ty.is_error() {
                let ty = self.render(&ty);
                self.diagnose(DeclError::NonProtocolInherit { ty, span });
            }
        }

        self.restore_inherited(decl, inherited);
    }

    /// Asks the conformance prover about every protocol `decl` lists.
    ///
    /// Compositions contribute each of their protocols. The prover reports
    /// its own failures; an error-typed subject is skipped.
    pub(crate) fn check_explicit_conformance(&mut self, decl: DeclId, ty: &Ty) {
        if ty.is_error() {
            return;
        }
        let decl_ref = self.ast.decl(decl);
        let span = decl_ref.span;
        let protocols: Vec<DeclId> = decl_ref
            .kind
            .inherited()
            .iter()
            .filter_map(|loc| loc.ty.as_ref()?.existential_protocols())
            .flatten()
            .collect();

        for protocol in protocols {
            let conforms = self
                .services
                .conforms_to_protocol(self.ast, ty, protocol, span);
            if !conforms {
                debug!(
                    "'{}' does not conform to '{}'",
                    self.render(ty),
                    self.ast.decl_name(protocol)
                );
            }
        }
    }

    fn take_inherited(&mut self, decl: DeclId) -> Vec<TypeLoc> {
        self.ast
            .decl_mut(decl)
            .kind
            .inherited_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn restore_inherited(&mut self, decl: DeclId, inherited: Vec<TypeLoc>) {
        if let Some(slot) = self.ast.decl_mut(decl).kind.inherited_mut() {
            *slot = inherited;
        }
    }
}

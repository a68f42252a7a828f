//! Type rendering for diagnostics.

use super::{Ty, TupleElt};
use crate::AstContext;
use std::fmt;

/// [`fmt::Display`] adapter returned by [`Ty::display`].
pub struct DisplayTy<'a> {
    ty: &'a Ty,
    ctx: &'a AstContext,
}

impl Ty {
    /// Renders this type using names from `ctx`.
    ///
    /// ```
    /// use corvid_ast::types::{PrimTy, Ty};
    /// use corvid_ast::AstContext;
    ///
    /// let ctx = AstContext::new();
    /// let ty = Ty::function(Ty::unit(), Ty::Primitive(PrimTy::Bool));
    /// assert_eq!(ty.display(&ctx).to_string(), "() -> Bool");
    /// ```
    #[must_use]
    pub fn display<'a>(&'a self, ctx: &'a AstContext) -> DisplayTy<'a> {
        DisplayTy { ty: self, ctx }
    }
}

impl fmt::Display for DisplayTy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_ty(self.ty, f)
    }
}

impl DisplayTy<'_> {
    fn write_ty(&self, ty: &Ty, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.ctx;
        match ty {
            Ty::Error => f.write_str("<<error type>>"),
            Ty::Primitive(prim) => f.write_str(prim.name()),
            Ty::Tuple(elts) => self.write_tuple(elts, f),
            Ty::Function { input, result } => {
                self.write_ty(input, f)?;
                f.write_str(" -> ")?;
                self.write_ty(result, f)
            }
            Ty::PolymorphicFunction {
                input,
                result,
                generic_owner,
            } => {
                f.write_str("<")?;
                for (i, param) in ctx.generic_param_decls(*generic_owner).iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(ctx.decl_name(*param))?;
                }
                f.write_str("> ")?;
                self.write_ty(input, f)?;
                f.write_str(" -> ")?;
                self.write_ty(result, f)
            }
            Ty::LValue(inner) => {
                f.write_str("@inout ")?;
                self.write_ty(inner, f)
            }
            Ty::Nominal { decl, args, .. } => {
                f.write_str(ctx.decl_name(*decl))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    self.write_list(args, f)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Ty::UnboundGeneric { decl, .. } | Ty::Protocol(decl) => {
                f.write_str(ctx.decl_name(*decl))
            }
            Ty::ProtocolComposition(parts) => {
                f.write_str("protocol<")?;
                self.write_list(parts, f)?;
                f.write_str(">")
            }
            Ty::Archetype(id) => f.write_str(ctx.interner.name(ctx.archetypes[*id].name)),
            Ty::Module(id) => write!(f, "module {}", ctx.interner.name(ctx.modules[*id].name)),
        }
    }

    fn write_list(&self, tys: &[Ty], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in tys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write_ty(ty, f)?;
        }
        Ok(())
    }

    fn write_tuple(&self, elts: &[TupleElt], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, elt) in elts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(name) = elt.name {
                write!(f, "{}: ", self.ctx.interner.name(name))?;
            }
            self.write_ty(&elt.ty, f)?;
            if elt.has_default {
                f.write_str(" = default")?;
            }
        }
        f.write_str(")")
    }
}

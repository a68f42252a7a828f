//! Session-wide AST storage.
//!
//! [`AstContext`] owns every arena of a compilation session. Passes borrow it
//! mutably to annotate nodes; nothing is ever freed before the session ends,
//! so handles stay valid across passes.

use crate::ast::{Decl, DeclContext, DeclKind, Expr, Module};
use crate::keywords::{KEYWORDS, THIS_TYPE};
use crate::types::{Archetype, Ty};
use crate::{ArchetypeId, DeclId, ExprId, ModuleId};
use corvid_mem::{Arena, StringInterner, Symbol};

/// Arena owner for declarations, expressions, modules and archetypes.
#[derive(Debug, Clone)]
pub struct AstContext {
    /// Identifier table, keywords pre-interned
    pub interner: StringInterner,
    /// All declarations
    pub decls: Arena<Decl>,
    /// All expressions
    pub exprs: Arena<Expr>,
    /// All modules
    pub modules: Arena<Module>,
    /// All archetypes
    pub archetypes: Arena<Archetype>,
}

impl Default for AstContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AstContext {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interner: StringInterner::with_pre_interned(KEYWORDS),
            decls: Arena::new(),
            exprs: Arena::new(),
            modules: Arena::new(),
            archetypes: Arena::new(),
        }
    }

    /// Interns an identifier.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// Text of an identifier.
    #[must_use]
    pub fn name(&self, sym: Symbol) -> &str {
        self.interner.name(sym)
    }

    /// Creates a module with no declarations.
    pub fn alloc_module(&mut self, name: &str) -> ModuleId {
        let name = self.intern(name);
        self.modules.alloc(Module::new(name))
    }

    /// Stores a declaration without attaching it anywhere.
    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.alloc(decl)
    }

    /// Stores an expression.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.alloc(expr)
    }

    /// Stores an archetype.
    pub fn alloc_archetype(&mut self, archetype: Archetype) -> ArchetypeId {
        self.archetypes.alloc(archetype)
    }

    /// Appends `decl` to the top level of `module`.
    pub fn add_to_module(&mut self, module: ModuleId, decl: DeclId) {
        self.modules[module].decls.push(decl);
    }

    /// Appends `member` to a container declaration.
    ///
    /// # Panics
    ///
    /// Panics if `parent` cannot have members.
    pub fn add_member(&mut self, parent: DeclId, member: DeclId) {
        let kind = self.decls[parent].kind.describe();
        match self.decls[parent].kind.members_mut() {
            Some(members) => members.push(member),
            None => panic!("{kind} declarations have no members"),
        }
    }

    /// Shared access to a declaration.
    #[must_use]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id]
    }

    /// Mutable access to a declaration.
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id]
    }

    /// Display name of a declaration; unnamed kinds render as their kind.
    #[must_use]
    pub fn decl_name(&self, id: DeclId) -> &str {
        let decl = &self.decls[id];
        decl.name()
            .map_or_else(|| decl.kind.describe(), |name| self.interner.name(name))
    }

    /// Generic parameter declarations of `id`, empty if it has none.
    #[must_use]
    pub fn generic_param_decls(&self, id: DeclId) -> &[DeclId] {
        self.decls[id]
            .kind
            .generic_params()
            .map_or(&[][..], |list| list.params.as_slice())
    }

    /// Module a declaration context ultimately belongs to.
    #[must_use]
    pub fn enclosing_module(&self, mut context: DeclContext) -> ModuleId {
        loop {
            match context {
                DeclContext::Module(module) => return module,
                DeclContext::Type(decl) | DeclContext::Function(decl) => {
                    context = self.decls[decl].context;
                }
            }
        }
    }

    /// Modules imported by resolved `import` declarations of `module`, in import order.
    #[must_use]
    pub fn imported_modules(&self, module: ModuleId) -> Vec<ModuleId> {
        self.modules[module]
            .decls
            .iter()
            .filter_map(|&decl| match &self.decls[decl].kind {
                DeclKind::Import {
                    module: Some(imported),
                    ..
                } => Some(*imported),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if `context` is the body of a type, protocol or extension.
    #[must_use]
    pub fn is_type_context(&self, context: DeclContext) -> bool {
        context.as_type().is_some_and(|decl| {
            matches!(
                self.decls[decl].kind,
                DeclKind::OneOf(_)
                    | DeclKind::Struct(_)
                    | DeclKind::Class(_)
                    | DeclKind::Protocol { .. }
                    | DeclKind::Extension { .. }
            )
        })
    }

    /// Type a declaration introduces, as seen from outside it.
    ///
    /// Generic nominals are unbound; extensions report their extended type once resolved.
    #[must_use]
    pub fn declared_type(&self, id: DeclId) -> Option<Ty> {
        let decl = &self.decls[id];
        match &decl.kind {
            DeclKind::Protocol { .. } => Some(Ty::Protocol(id)),
            DeclKind::Extension { extended, .. } => extended.ty.clone(),
            kind => {
                let (nominal_kind, nominal) = kind.as_nominal()?;
                Some(if nominal.generic_params.is_some() {
                    Ty::UnboundGeneric {
                        kind: nominal_kind,
                        decl: id,
                    }
                } else {
                    Ty::Nominal {
                        kind: nominal_kind,
                        decl: id,
                        args: Vec::new(),
                    }
                })
            }
        }
    }

    /// Type a declaration introduces, as seen from its own body.
    ///
    /// Generic nominals are applied to their parameters' archetypes; a
    /// protocol is seen through its `This` archetype.
    #[must_use]
    pub fn declared_type_in_context(&self, id: DeclId) -> Option<Ty> {
        let decl = &self.decls[id];
        match &decl.kind {
            DeclKind::Protocol { members, .. } => {
                let this = members.iter().find_map(|&member| match &self.decls[member].kind {
                    DeclKind::TypeAlias {
                        name, underlying, ..
                    } if *name == THIS_TYPE => underlying.ty.clone(),
                    _ => None,
                });
                Some(this.unwrap_or(Ty::Protocol(id)))
            }
            DeclKind::Extension { extended, .. } => match extended.ty.as_ref()? {
                Ty::UnboundGeneric { decl, .. } => self.declared_type_in_context(*decl),
                other => Some(other.clone()),
            },
            kind => {
                let (nominal_kind, nominal) = kind.as_nominal()?;
                let args = nominal
                    .generic_params
                    .iter()
                    .flat_map(|list| &list.params)
                    .map(|&param| self.alias_underlying(param))
                    .collect();
                Some(Ty::Nominal {
                    kind: nominal_kind,
                    decl: id,
                    args,
                })
            }
        }
    }

    /// Type of `this` inside members declared in `context`.
    #[must_use]
    pub fn this_type(&self, context: DeclContext) -> Option<Ty> {
        context
            .as_type()
            .and_then(|decl| self.declared_type_in_context(decl))
    }

    /// Scope that names written inside `id` are looked up from.
    ///
    /// Types and functions open a scope of their own. Every other
    /// declaration resolves names in the context it is declared in.
    #[must_use]
    pub fn scope_of(&self, id: DeclId) -> DeclContext {
        let decl = &self.decls[id];
        match decl.kind {
            DeclKind::OneOf(_)
            | DeclKind::Struct(_)
            | DeclKind::Class(_)
            | DeclKind::Protocol { .. }
            | DeclKind::Extension { .. } => DeclContext::Type(id),
            DeclKind::Func { .. } | DeclKind::Constructor { .. } | DeclKind::Destructor { .. } => {
                DeclContext::Function(id)
            }
            _ => decl.context,
        }
    }

    /// Innermost generic parameter or member type alias named `name` that is
    /// visible from `context`.
    ///
    /// Scopes are searched from the inside out, stopping before module
    /// scope. An extension also sees the parameters and aliases of the type
    /// it extends, once its extended type has resolved.
    #[must_use]
    pub fn lookup_type_in_scope(&self, mut context: DeclContext, name: Symbol) -> Option<DeclId> {
        loop {
            let owner = match context {
                DeclContext::Module(_) => return None,
                DeclContext::Type(decl) | DeclContext::Function(decl) => decl,
            };
            if let Some(found) = self.type_named_in(owner, name) {
                return Some(found);
            }
            context = self.decls[owner].context;
        }
    }

    fn type_named_in(&self, owner: DeclId, name: Symbol) -> Option<DeclId> {
        let kind = &self.decls[owner].kind;
        let found = self
            .generic_param_decls(owner)
            .iter()
            .chain(kind.members())
            .copied()
            .find(|&id| {
                let decl = &self.decls[id];
                decl.name() == Some(name) && matches!(decl.kind, DeclKind::TypeAlias { .. })
            });
        if found.is_some() {
            return found;
        }

        match kind {
            DeclKind::Extension { extended, .. } => match extended.ty.as_ref()? {
                Ty::UnboundGeneric { decl, .. } | Ty::Nominal { decl, .. } => {
                    self.type_named_in(*decl, name)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn alias_underlying(&self, alias: DeclId) -> Ty {
        match &self.decls[alias].kind {
            DeclKind::TypeAlias { underlying, .. } => underlying.ty_or_error(),
            _ => Ty::Error,
        }
    }
}

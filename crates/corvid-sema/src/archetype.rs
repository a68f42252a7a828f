//! Archetype assignment for generic parameter lists.
//!
//! The builder collects the parameters of one [`GenericParamList`] together
//! with their requirements and produces one [`Archetype`] per equivalence
//! class of parameters:
//!
//! - a parameter's own inherited protocols become bounds of its class
//! - `T : P` adds `P` to the bounds of `T`'s class
//! - `T == U` merges the classes of `T` and `U`
//!
//! Requirement subjects are matched to parameters by archetype if already
//! resolved and by spelled name otherwise, since the first round of
//! registration runs before any archetype exists.
//!
//! [`GenericParamList`]: corvid_ast::ast::GenericParamList

use corvid_ast::ast::{DeclKind, Requirement, TypeLoc, TypeRepr};
use corvid_ast::types::{Archetype, Ty};
use corvid_ast::{ArchetypeId, AstContext, DeclId};
use corvid_log::trace;
use corvid_mem::Symbol;
use fxhash::FxHashMap;

/// One registered generic parameter.
#[derive(Debug, Clone)]
struct PotentialArchetype {
    alias: DeclId,
    name: Symbol,
    index: u32,
    bounds: Vec<Ty>,
    existing: Option<ArchetypeId>,
}

/// Collects generic parameters and requirements, then assigns archetypes.
#[derive(Debug, Default)]
pub struct ArchetypeBuilder {
    params: Vec<PotentialArchetype>,
    parent: Vec<usize>,
    requirements: Vec<Requirement>,
}

impl ArchetypeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the generic parameter declared by the type alias `alias` at position `index`.
    ///
    /// The alias's resolved protocol bounds become the initial bounds of the parameter.
    ///
    /// # Panics
    ///
    /// Panics if `alias` is not a type alias declaration.
    pub fn add_generic_parameter(&mut self, ast: &AstContext, alias: DeclId, index: u32) {
        let DeclKind::TypeAlias {
            name,
            underlying,
            inherited,
        } = &ast.decl(alias).kind
        else {
            panic!("generic parameter {alias:?} is not a type alias");
        };

        let existing = match underlying.ty {
            Some(Ty::Archetype(id)) => Some(id),
            _ => None,
        };
        let bounds = inherited
            .iter()
            .filter_map(|loc| loc.ty.clone())
            .filter(Ty::is_existential)
            .collect();

        let slot = self.params.len();
        self.params.push(PotentialArchetype {
            alias,
            name: *name,
            index,
            bounds,
            existing,
        });
        self.parent.push(slot);
    }

    /// Registers a requirement.
    ///
    /// Operands that do not name a registered parameter, and protocol operands
    /// that are not existential, are recorded but add no constraint.
    pub fn add_requirement(&mut self, ast: &AstContext, requirement: &Requirement) {
        match requirement {
            Requirement::Conformance {
                subject, protocol, ..
            } => {
                if let (Some(slot), Some(proto)) = (self.param_for(ast, subject), &protocol.ty) {
                    if proto.is_existential() {
                        let root = self.find(slot);
                        push_unique(&mut self.params[root].bounds, proto.clone());
                    }
                }
            }
            Requirement::SameType { first, second, .. } => {
                if let (Some(a), Some(b)) = (self.param_for(ast, first), self.param_for(ast, second)) {
                    self.union(a, b);
                }
            }
        }
        self.requirements.push(requirement.clone());
    }

    /// Records a requirement without touching parameter classes.
    ///
    /// Used once archetypes are assigned, when requirements are re-registered
    /// with their remaining operands resolved.
    pub fn record_requirement(&mut self, requirement: &Requirement) {
        self.requirements.push(requirement.clone());
    }

    /// Requirements registered so far, in registration order.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Produces one archetype per equivalence class and returns, for every
    /// registered parameter in order, its alias and archetype.
    ///
    /// A class that already has an archetype from an earlier run keeps it.
    pub fn assign_archetypes(&mut self, ast: &mut AstContext) -> Vec<(DeclId, ArchetypeId)> {
        let mut class_archetype: FxHashMap<usize, ArchetypeId> = FxHashMap::default();

        for slot in 0..self.params.len() {
            let root = self.find(slot);
            if let Some(existing) = self.params[slot].existing {
                class_archetype.entry(root).or_insert(existing);
            }
        }

        let mut assigned = Vec::with_capacity(self.params.len());
        for slot in 0..self.params.len() {
            let root = self.find(slot);
            let archetype = match class_archetype.get(&root) {
                Some(&id) => id,
                None => {
                    let bounds = self.class_bounds(root);
                    let members = self.class_size(root);
                    let (name, index) = (self.params[root].name, self.params[root].index);
                    let id = ast.alloc_archetype(Archetype::new(name, Some(index), bounds));
                    trace!(
                        "archetype {} (index {index}) for {members} parameter(s)",
                        ast.name(name)
                    );
                    class_archetype.insert(root, id);
                    id
                }
            };
            assigned.push((self.params[slot].alias, archetype));
        }
        assigned
    }

    fn class_bounds(&mut self, root: usize) -> Vec<Ty> {
        let mut bounds = Vec::new();
        for slot in 0..self.params.len() {
            if self.find(slot) == root {
                for bound in &self.params[slot].bounds {
                    push_unique(&mut bounds, bound.clone());
                }
            }
        }
        bounds
    }

    fn class_size(&mut self, root: usize) -> usize {
        (0..self.params.len()).filter(|&slot| self.find(slot) == root).count()
    }

    fn param_for(&self, ast: &AstContext, loc: &TypeLoc) -> Option<usize> {
        if let Some(Ty::Archetype(id)) = &loc.ty {
            return self.params.iter().position(|p| p.existing == Some(*id)).or_else(|| {
                self.params.iter().position(|p| {
                    matches!(&ast.decl(p.alias).kind,
                        DeclKind::TypeAlias { underlying, .. } if underlying.ty == Some(Ty::Archetype(*id)))
                })
            });
        }
        match &loc.repr {
            Some(TypeRepr::Named { name, args, .. }) if args.is_empty() => {
                self.params.iter().position(|p| p.name == *name)
            }
            _ => None,
        }
    }

    fn find(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = slot;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        // The earlier parameter stays representative so the archetype keeps its name and index.
        let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[merge] = keep;
        let moved = std::mem::take(&mut self.params[merge].bounds);
        for bound in moved {
            push_unique(&mut self.params[keep].bounds, bound);
        }
        if self.params[keep].existing.is_none() {
            self.params[keep].existing = self.params[merge].existing;
        }
    }
}

fn push_unique(list: &mut Vec<Ty>, ty: Ty) {
    if !list.contains(&ty) {
        list.push(ty);
    }
}

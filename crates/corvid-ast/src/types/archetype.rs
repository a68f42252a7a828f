//! Archetypes.
//!
//! An archetype is the type a generic parameter or associated type has inside
//! the declaration that introduces it. Archetypes live in
//! [`AstContext::archetypes`](crate::AstContext::archetypes) and are referred
//! to by [`ArchetypeId`](crate::ArchetypeId); once assigned they do not change.

use super::Ty;
use corvid_mem::Symbol;

/// Placeholder type for one generic parameter or associated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetype {
    /// Name of the parameter or associated type
    pub name: Symbol,
    /// Position among sibling parameters; `Some(0)` for a protocol's `This`
    pub index: Option<u32>,
    /// Protocol types this archetype is known to conform to
    pub conforms_to: Vec<Ty>,
}

impl Archetype {
    /// Creates an archetype.
    #[must_use]
    pub const fn new(name: Symbol, index: Option<u32>, conforms_to: Vec<Ty>) -> Self {
        Self {
            name,
            index,
            conforms_to,
        }
    }

    /// Returns `true` if `protocol` is among the bounds.
    #[must_use]
    pub fn conforms_to(&self, protocol: &Ty) -> bool {
        self.conforms_to.contains(protocol)
    }
}

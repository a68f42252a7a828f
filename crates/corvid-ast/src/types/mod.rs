//! Semantic types produced by checking.
//!
//! - [`Ty`] - resolved types, including the [`Ty::Error`] recovery marker
//! - [`Archetype`] - placeholders for generic parameters and associated types
//! - [`DisplayTy`] - rendering for diagnostics

pub mod archetype;
pub mod display;
pub mod ty;

pub use archetype::Archetype;
pub use display::DisplayTy;
pub use ty::{NominalKind, PrimTy, TupleElt, Ty};

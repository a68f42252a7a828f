//! Memory infrastructure for the Corvid compiler.
//!
//! - [`Symbol`] / [`StringInterner`]: deduplicated identifiers compared by id
//! - [`Arena`] / [`Idx`]: append-only typed storage addressed by stable handles
//!
//! AST nodes, archetypes and modules all live in arenas owned by the compilation
//! session, so handles stay valid for every checking pass.

pub mod arena;
pub mod interner;
pub mod symbol;

pub use arena::{Arena, Idx};
pub use interner::StringInterner;
pub use symbol::Symbol;

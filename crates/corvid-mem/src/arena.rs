//! Typed append-only arenas.
//!
//! An [`Arena<T>`] owns values of one type and hands out [`Idx<T>`] handles.
//! Values are never removed or moved to another slot, so a handle obtained
//! while parsing stays valid through every later phase. Handles are `Copy`,
//! compare by position, and carry their element type so a declaration handle
//! cannot be used to index the expression arena.
//!
//! ```
//! use corvid_mem::Arena;
//!
//! let mut arena = Arena::new();
//! let a = arena.alloc("struct Point");
//! let b = arena.alloc("class Shape");
//!
//! assert_eq!(arena[a], "struct Point");
//! arena[b] = "class Circle";
//! assert_eq!(arena.len(), 2);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Stable handle to a value stored in an [`Arena<T>`].
pub struct Idx<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Builds a handle from a raw slot number.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Slot number of this handle.
    #[must_use]
    pub const fn into_raw(self) -> u32 {
        self.raw
    }

    const fn slot(self) -> usize {
        self.raw as usize
    }
}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        write!(f, "{short}#{}", self.raw)
    }
}

/// Append-only storage for values of type `T`.
#[derive(Clone)]
pub struct Arena<T> {
    data: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Stores `value` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` values.
    pub fn alloc(&mut self, value: T) -> Idx<T> {
        let raw = u32::try_from(self.data.len()).expect("arena exhausted the u32 index space");
        self.data.push(value);
        Idx::from_raw(raw)
    }

    /// Returns the value behind `idx`, or `None` for a handle from another arena.
    #[must_use]
    pub fn get(&self, idx: Idx<T>) -> Option<&T> {
        self.data.get(idx.slot())
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, idx: Idx<T>) -> Option<&mut T> {
        self.data.get_mut(idx.slot())
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over handles and values in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(slot, value)| (Idx::from_raw(slot as u32), value))
    }

    /// Iterates over handles in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = Idx<T>> + use<T> {
        let len = self.data.len() as u32;
        (0..len).map(Idx::from_raw)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> Index<Idx<T>> for Arena<T> {
    type Output = T;

    fn index(&self, idx: Idx<T>) -> &T {
        &self.data[idx.slot()]
    }
}

impl<T> IndexMut<Idx<T>> for Arena<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        &mut self.data[idx.slot()]
    }
}

//! Sort System.
//!
//! Only the sorts the boolean abstraction layer needs to tell apart are
//! modelled: `Bool`, `Int`, and named uninterpreted sorts.

use lasso::Spur;
use rustc_hash::FxHashMap;

/// Sort identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortId(pub u32);

impl SortId {
    /// Index into the sort table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Boolean sort
    Bool,
    /// Mathematical integers
    Int,
    /// Uninterpreted sort with the given name
    Uninterpreted(Spur),
}

/// A sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// The kind of this sort
    pub kind: SortKind,
}

impl Sort {
    /// Check if this is the boolean sort
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.kind, SortKind::Bool)
    }

    /// Check if this is the integer sort
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self.kind, SortKind::Int)
    }
}

/// Interning table for sorts.
#[derive(Debug)]
pub struct SortManager {
    sorts: Vec<Sort>,
    by_kind: FxHashMap<SortKind, SortId>,
    /// The boolean sort
    pub bool_sort: SortId,
    /// The integer sort
    pub int_sort: SortId,
}

impl SortManager {
    /// Create a sort manager with the builtin sorts registered.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            sorts: Vec::new(),
            by_kind: FxHashMap::default(),
            bool_sort: SortId(0),
            int_sort: SortId(0),
        };
        manager.bool_sort = manager.intern(SortKind::Bool);
        manager.int_sort = manager.intern(SortKind::Int);
        manager
    }

    /// Intern a sort kind, returning its identifier.
    pub fn intern(&mut self, kind: SortKind) -> SortId {
        if let Some(&id) = self.by_kind.get(&kind) {
            return id;
        }
        let id = SortId(self.sorts.len() as u32);
        self.sorts.push(Sort { kind });
        self.by_kind.insert(kind, id);
        id
    }

    /// Look up a sort.
    #[must_use]
    pub fn get(&self, id: SortId) -> Option<&Sort> {
        self.sorts.get(id.index())
    }

    /// Number of interned sorts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    /// Check if no sort is interned (never true after `new`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }
}

impl Default for SortManager {
    fn default() -> Self {
        Self::new()
    }
}

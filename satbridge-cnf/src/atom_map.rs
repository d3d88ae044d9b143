//! Atom–variable association.
//!
//! Maps boolean atoms to the SAT variables that stand for them. An entry,
//! once made, is never changed, so the map can be shared by several encoder
//! calls feeding the same engine and later handed to the decoder.

use rustc_hash::FxHashMap;
use satbridge_core::TermId;
use satbridge_sat::Var;

/// Persistent map from atoms to SAT variables.
#[derive(Debug, Clone, Default)]
pub struct AtomMap {
    to_var: FxHashMap<TermId, Var>,
}

impl AtomMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Variable associated with an atom.
    #[must_use]
    pub fn get(&self, atom: TermId) -> Option<Var> {
        self.to_var.get(&atom).copied()
    }

    /// Record the variable of a fresh atom.
    ///
    /// Existing associations are kept: inserting an atom that is already
    /// mapped returns the variable it had.
    pub fn insert(&mut self, atom: TermId, var: Var) -> Var {
        *self.to_var.entry(atom).or_insert(var)
    }

    /// Number of mapped atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_var.len()
    }

    /// Check if no atom is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_var.is_empty()
    }

    /// Iterate over all associations (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (TermId, Var)> + '_ {
        self.to_var.iter().map(|(&t, &v)| (t, v))
    }

    /// Inverse table indexed by variable, for the first `num_vars` variables.
    #[must_use]
    pub fn inverse(&self, num_vars: usize) -> Vec<Option<TermId>> {
        let mut inv = vec![None; num_vars];
        for (&atom, &var) in &self.to_var {
            if let Some(slot) = inv.get_mut(var.index()) {
                *slot = Some(atom);
            }
        }
        inv
    }
}

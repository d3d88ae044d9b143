//! The SAT engine interface seen by the CNF layer.
//!
//! The CNF encoder only allocates variables and adds clauses; the decoder
//! reads the engine's root-level assignment, its stored clauses and the log
//! of model reconstruction steps recorded by preprocessing. Search itself is
//! not part of this interface.

use crate::literal::{LBool, Lit, Var};
use crate::reconstruction::ReconstructionLog;

/// Which clause database to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseOrigin {
    /// Clauses added from the input
    Original,
    /// Clauses learned during search
    Learned,
}

/// Operations the CNF layer needs from a SAT engine.
pub trait SatEngine {
    /// Allocate a fresh variable. External variables must stay observable
    /// and may not be eliminated by preprocessing.
    fn new_var(&mut self, external: bool) -> Var;

    /// Add a clause (a disjunction of literals).
    fn add_clause(&mut self, lits: &[Lit]);

    /// Number of allocated variables. Ids are dense in `0..num_vars()`.
    fn num_vars(&self) -> usize;

    /// Root-level value of a variable.
    fn value(&self, var: Var) -> LBool;

    /// Check whether the clause set is already known to be unsatisfiable.
    fn is_inconsistent(&self) -> bool;

    /// Stored two-literal clauses. With `learned`, learned binary clauses
    /// are included after the original ones.
    fn binary_clauses(&self, learned: bool) -> Vec<(Lit, Lit)>;

    /// Stored clauses of three or more literals from one database.
    fn clauses(&self, origin: ClauseOrigin) -> Box<dyn Iterator<Item = &[Lit]> + '_>;

    /// Reconstruction steps recorded by preprocessing, oldest first.
    fn reconstruction_log(&self) -> &ReconstructionLog;

    /// Approximate heap usage in bytes.
    fn memory_usage(&self) -> u64;
}

//! In-memory clause store.
//!
//! [`ClauseStore`] is a complete [`SatEngine`] without a search procedure:
//! it keeps the clause databases, a root-level assignment maintained by unit
//! propagation, the external-variable flags and the reconstruction log.
//! It is what the CNF layer is tested against, and it is useful on its own
//! for callers that only need to inspect or preprocess CNF.
//!
//! Clauses are normalized on insertion: duplicate literals are dropped,
//! tautologies and clauses already satisfied at the root are discarded,
//! literals false at the root are removed. An empty clause makes the store
//! inconsistent; a unit clause is assigned and propagated.
//!
//! Propagation has no watch lists: every new root assignment rescans all
//! clause databases, which is quadratic in the clause count for unit-heavy
//! input. Engines meant for large instances should implement [`SatEngine`]
//! themselves.

use crate::engine::{ClauseOrigin, SatEngine};
use crate::literal::{LBool, Lit, Var, lit_value};
use crate::reconstruction::ReconstructionLog;
use smallvec::SmallVec;

/// Storage for one clause of three or more literals.
pub type ClauseLits = SmallVec<[Lit; 4]>;

/// Counters for the clause store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseStoreStats {
    /// Calls to `add_clause` / `add_learned_clause`
    pub clauses_added: u64,
    /// Clauses dropped as tautologies
    pub tautologies: u64,
    /// Clauses dropped because they were satisfied at the root
    pub satisfied: u64,
    /// Root-level assignments made (units and propagations)
    pub assignments: u64,
}

enum Propagation {
    Unit(Lit),
    Conflict,
    Fixpoint,
}

enum Normalized {
    Satisfied,
    Tautology,
    Clause(ClauseLits),
}

/// Clause databases plus root-level assignment.
#[derive(Debug, Clone, Default)]
pub struct ClauseStore {
    external: Vec<bool>,
    eliminated: Vec<bool>,
    assignment: Vec<LBool>,
    binary: Vec<(Lit, Lit)>,
    learned_binary: Vec<(Lit, Lit)>,
    clauses: Vec<ClauseLits>,
    learned: Vec<ClauseLits>,
    inconsistent: bool,
    log: ReconstructionLog,
    stats: ClauseStoreStats,
}

impl ClauseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics.
    #[must_use]
    pub fn stats(&self) -> &ClauseStoreStats {
        &self.stats
    }

    /// Check whether a variable was allocated as external.
    #[must_use]
    pub fn is_external(&self, var: Var) -> bool {
        self.external.get(var.index()).copied().unwrap_or(false)
    }

    /// Check whether a variable was removed by elimination.
    #[must_use]
    pub fn is_eliminated(&self, var: Var) -> bool {
        self.eliminated.get(var.index()).copied().unwrap_or(false)
    }

    /// Root-level assignment of all variables.
    #[must_use]
    pub fn assignment(&self) -> &[LBool] {
        &self.assignment
    }

    /// Original binary clauses, in insertion order.
    #[must_use]
    pub fn original_binary(&self) -> &[(Lit, Lit)] {
        &self.binary
    }

    /// Original clauses of three or more literals, in insertion order.
    #[must_use]
    pub fn original_clauses(&self) -> &[ClauseLits] {
        &self.clauses
    }

    /// Number of stored original clauses (binary and longer).
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.binary.len() + self.clauses.len()
    }

    /// Add a clause learned by an external search procedure.
    pub fn add_learned_clause(&mut self, lits: &[Lit]) {
        self.insert(lits, ClauseOrigin::Learned);
    }

    /// Check whether a full assignment satisfies the root assignment and
    /// every stored original clause. Eliminated variables are ignored.
    #[must_use]
    pub fn is_model(&self, values: &[bool]) -> bool {
        let holds = |lit: Lit| {
            values
                .get(lit.var().index())
                .is_some_and(|&v| v == lit.is_pos())
        };
        if self.inconsistent {
            return false;
        }
        let root_ok = self.assignment.iter().enumerate().all(|(i, v)| match v.to_bool() {
            Some(b) => values.get(i) == Some(&b),
            None => true,
        });
        root_ok
            && self.binary.iter().all(|&(a, b)| holds(a) || holds(b))
            && self.clauses.iter().all(|c| c.iter().any(|&l| holds(l)))
    }

    fn normalize(&self, lits: &[Lit]) -> Normalized {
        let mut out = ClauseLits::new();
        for &lit in lits {
            match lit_value(&self.assignment, lit) {
                LBool::True => return Normalized::Satisfied,
                LBool::False => continue,
                LBool::Undef => {}
            }
            if out.contains(&!lit) {
                return Normalized::Tautology;
            }
            if !out.contains(&lit) {
                out.push(lit);
            }
        }
        Normalized::Clause(out)
    }

    fn insert(&mut self, lits: &[Lit], origin: ClauseOrigin) {
        self.stats.clauses_added += 1;
        if self.inconsistent {
            return;
        }
        let clause = match self.normalize(lits) {
            Normalized::Satisfied => {
                self.stats.satisfied += 1;
                return;
            }
            Normalized::Tautology => {
                self.stats.tautologies += 1;
                return;
            }
            Normalized::Clause(clause) => clause,
        };
        match clause.len() {
            0 => {
                tracing::debug!("empty clause, store is inconsistent");
                self.inconsistent = true;
            }
            1 => {
                self.assign(clause[0]);
                self.propagate();
            }
            2 => match origin {
                ClauseOrigin::Original => self.binary.push((clause[0], clause[1])),
                ClauseOrigin::Learned => self.learned_binary.push((clause[0], clause[1])),
            },
            _ => match origin {
                ClauseOrigin::Original => self.clauses.push(clause),
                ClauseOrigin::Learned => self.learned.push(clause),
            },
        }
    }

    fn assign(&mut self, lit: Lit) {
        let idx = lit.var().index();
        if self.assignment.len() <= idx {
            self.assignment.resize(idx + 1, LBool::Undef);
        }
        self.assignment[idx] = LBool::from_bool(lit.is_pos());
        self.stats.assignments += 1;
    }

    /// Unit propagation to fixpoint over every database.
    fn propagate(&mut self) {
        loop {
            match self.find_unit() {
                Propagation::Unit(lit) => self.assign(lit),
                Propagation::Conflict => {
                    tracing::debug!("conflict during root propagation");
                    self.inconsistent = true;
                    return;
                }
                Propagation::Fixpoint => return,
            }
        }
    }

    fn find_unit(&self) -> Propagation {
        let binary = self
            .binary
            .iter()
            .chain(&self.learned_binary)
            .map(|&(a, b)| self.clause_status(&[a, b]));
        let long = self
            .clauses
            .iter()
            .chain(&self.learned)
            .map(|c| self.clause_status(c));
        for status in binary.chain(long) {
            match status {
                Propagation::Fixpoint => {}
                found => return found,
            }
        }
        Propagation::Fixpoint
    }

    fn clause_status(&self, lits: &[Lit]) -> Propagation {
        let mut open = None;
        let mut num_open = 0;
        for &lit in lits {
            match lit_value(&self.assignment, lit) {
                LBool::True => return Propagation::Fixpoint,
                LBool::False => {}
                LBool::Undef => {
                    num_open += 1;
                    open = Some(lit);
                }
            }
        }
        match (num_open, open) {
            (0, _) => Propagation::Conflict,
            (1, Some(lit)) => Propagation::Unit(lit),
            _ => Propagation::Fixpoint,
        }
    }

    /// Remove every clause mentioning `var` and return the original ones.
    /// Learned clauses mentioning it are dropped.
    pub(crate) fn take_occurrences(&mut self, var: Var) -> Vec<ClauseLits> {
        let mut removed = Vec::new();
        self.binary.retain(|&(a, b)| {
            if a.var() == var || b.var() == var {
                removed.push([a, b].into_iter().collect());
                false
            } else {
                true
            }
        });
        self.clauses.retain(|c| {
            if c.iter().any(|l| l.var() == var) {
                removed.push(c.clone());
                false
            } else {
                true
            }
        });
        self.learned_binary
            .retain(|&(a, b)| a.var() != var && b.var() != var);
        self.learned.retain(|c| c.iter().all(|l| l.var() != var));
        removed
    }

    /// Original clauses mentioning `var`, without removing them.
    pub(crate) fn occurrences(&self, var: Var) -> Vec<ClauseLits> {
        self.binary
            .iter()
            .filter(|(a, b)| a.var() == var || b.var() == var)
            .map(|&(a, b)| [a, b].into_iter().collect())
            .chain(
                self.clauses
                    .iter()
                    .filter(|c| c.iter().any(|l| l.var() == var))
                    .cloned(),
            )
            .collect()
    }

    pub(crate) fn mark_eliminated(&mut self, var: Var, removed: Vec<ClauseLits>) {
        if self.eliminated.len() <= var.index() {
            self.eliminated.resize(var.index() + 1, false);
        }
        self.eliminated[var.index()] = true;
        self.log.push(var, removed);
    }
}

impl SatEngine for ClauseStore {
    fn new_var(&mut self, external: bool) -> Var {
        let var = Var(self.external.len() as u32);
        self.external.push(external);
        self.eliminated.push(false);
        self.assignment.push(LBool::Undef);
        var
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        self.insert(lits, ClauseOrigin::Original);
    }

    fn num_vars(&self) -> usize {
        self.external.len()
    }

    fn value(&self, var: Var) -> LBool {
        self.assignment
            .get(var.index())
            .copied()
            .unwrap_or(LBool::Undef)
    }

    fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    fn binary_clauses(&self, learned: bool) -> Vec<(Lit, Lit)> {
        let mut out = self.binary.clone();
        if learned {
            out.extend_from_slice(&self.learned_binary);
        }
        out
    }

    fn clauses(&self, origin: ClauseOrigin) -> Box<dyn Iterator<Item = &[Lit]> + '_> {
        let db = match origin {
            ClauseOrigin::Original => &self.clauses,
            ClauseOrigin::Learned => &self.learned,
        };
        Box::new(db.iter().map(|c| c.as_slice()))
    }

    fn reconstruction_log(&self) -> &ReconstructionLog {
        &self.log
    }

    fn memory_usage(&self) -> u64 {
        let lit = std::mem::size_of::<Lit>();
        let clause = std::mem::size_of::<ClauseLits>();
        let per_var = std::mem::size_of::<LBool>() + 2 * std::mem::size_of::<bool>();
        let logged: usize = self
            .log
            .entries()
            .iter()
            .map(|e| e.clauses.len() * clause)
            .sum();
        let bytes = self.external.len() * per_var
            + (self.binary.len() + self.learned_binary.len()) * 2 * lit
            + (self.clauses.len() + self.learned.len()) * clause
            + logged;
        bytes as u64
    }
}

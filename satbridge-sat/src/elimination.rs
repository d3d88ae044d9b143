//! Bounded Variable Elimination.
//!
//! Removes an internal variable by replacing every clause it occurs in with
//! the non-tautological resolvents on that variable, provided the clause
//! database does not grow beyond the configured bound. Removed clauses are
//! pushed onto the store's reconstruction log so models can be lifted back.
//!
//! External and root-assigned variables are never eliminated.

use crate::clause_store::{ClauseLits, ClauseStore};
use crate::engine::SatEngine;
use crate::literal::{Lit, Var};

/// Configuration for variable elimination.
#[derive(Clone, Debug)]
pub struct EliminationConfig {
    /// Maximum resolvent size
    pub max_clause_size: usize,
    /// Maximum number of resolvents allowed per variable
    pub max_resolvents: usize,
    /// How many more clauses than were removed an elimination may add
    pub max_growth: usize,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            max_clause_size: 16,
            max_resolvents: 100,
            max_growth: 0,
        }
    }
}

/// Statistics about variable elimination.
#[derive(Clone, Debug, Default)]
pub struct EliminationStats {
    /// Number of variables eliminated
    pub vars_eliminated: usize,
    /// Number of clauses removed
    pub clauses_removed: usize,
    /// Number of resolvents added
    pub resolvents_added: usize,
    /// Number of candidates rejected by the bounds
    pub rejected: usize,
}

/// Variable elimination engine for a [`ClauseStore`].
pub struct VariableEliminator {
    config: EliminationConfig,
    stats: EliminationStats,
}

impl VariableEliminator {
    /// Create a new variable eliminator.
    #[must_use]
    pub fn new(config: EliminationConfig) -> Self {
        Self {
            config,
            stats: EliminationStats::default(),
        }
    }

    /// Get elimination statistics.
    #[must_use]
    pub fn stats(&self) -> &EliminationStats {
        &self.stats
    }

    /// Eliminate as many internal variables as the bounds allow, cheapest
    /// first. Returns the eliminated variables in elimination order.
    pub fn eliminate(&mut self, store: &mut ClauseStore) -> Vec<Var> {
        let mut queue: Vec<(Var, i64)> = (0..store.num_vars() as u32)
            .map(Var)
            .filter(|&v| Self::is_candidate(store, v))
            .map(|v| (v, Self::cost(store, v)))
            .collect();
        // stable: ties keep variable order
        queue.sort_by_key(|&(_, cost)| cost);

        let mut eliminated = Vec::new();
        for (var, _) in queue {
            if store.is_inconsistent() {
                break;
            }
            if self.eliminate_var(store, var) {
                eliminated.push(var);
            }
        }
        eliminated
    }

    /// Try to eliminate one variable. Returns `true` on success.
    pub fn eliminate_var(&mut self, store: &mut ClauseStore, var: Var) -> bool {
        if !Self::is_candidate(store, var) {
            return false;
        }
        let occurrences = store.occurrences(var);
        let (pos, neg): (Vec<&ClauseLits>, Vec<&ClauseLits>) = occurrences
            .iter()
            .partition(|c| c.contains(&Lit::pos(var)));

        let mut resolvents: Vec<ClauseLits> = Vec::new();
        for p in &pos {
            for n in &neg {
                if let Some(r) = Self::resolve(p, n, var) {
                    if r.len() > self.config.max_clause_size
                        || resolvents.len() >= self.config.max_resolvents
                    {
                        self.stats.rejected += 1;
                        return false;
                    }
                    if !resolvents.contains(&r) {
                        resolvents.push(r);
                    }
                }
            }
        }
        if resolvents.len() > occurrences.len() + self.config.max_growth {
            self.stats.rejected += 1;
            return false;
        }

        let removed = store.take_occurrences(var);
        tracing::trace!(
            var = var.0,
            removed = removed.len(),
            resolvents = resolvents.len(),
            "eliminating variable"
        );
        self.stats.vars_eliminated += 1;
        self.stats.clauses_removed += removed.len();
        self.stats.resolvents_added += resolvents.len();
        store.mark_eliminated(var, removed);
        for r in &resolvents {
            store.add_clause(r);
        }
        true
    }

    fn is_candidate(store: &ClauseStore, var: Var) -> bool {
        var.index() < store.num_vars()
            && !store.is_external(var)
            && !store.is_eliminated(var)
            && store.value(var).is_undef()
    }

    /// Resolvent count minus removed clause count.
    fn cost(store: &ClauseStore, var: Var) -> i64 {
        let occurrences = store.occurrences(var);
        let pos = occurrences
            .iter()
            .filter(|c| c.contains(&Lit::pos(var)))
            .count() as i64;
        let neg = occurrences.len() as i64 - pos;
        pos * neg - (pos + neg)
    }

    /// Resolve two clauses on `var`; `None` if the resolvent is a tautology.
    fn resolve(pos: &[Lit], neg: &[Lit], var: Var) -> Option<ClauseLits> {
        let mut out = ClauseLits::new();
        for &lit in pos.iter().chain(neg) {
            if lit.var() == var {
                continue;
            }
            if out.contains(&!lit) {
                return None;
            }
            if !out.contains(&lit) {
                out.push(lit);
            }
        }
        Some(out)
    }
}

impl Default for VariableEliminator {
    fn default() -> Self {
        Self::new(EliminationConfig::default())
    }
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use satbridge_core::{CancelHandle, Model, ModelEvaluator, TermId, TermManager};
use satbridge_sat::{ClauseOrigin, ClauseStore, LBool, Lit, ReconstructionLog, SatEngine, Var};

/// Engine wrapper that records every clause it receives and can trigger
/// cancellation after a given number of clauses, or on the first read of
/// its assignment.
#[derive(Default)]
pub struct RecordingEngine {
    pub inner: ClauseStore,
    pub clauses: Vec<Vec<Lit>>,
    pub new_vars: Vec<(Var, bool)>,
    pub cancel_at: Option<(usize, CancelHandle)>,
    pub cancel_on_read: Option<CancelHandle>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_after(clauses: usize, handle: CancelHandle) -> Self {
        Self {
            cancel_at: Some((clauses, handle)),
            ..Self::default()
        }
    }

    pub fn cancel_on_read(inner: ClauseStore, handle: CancelHandle) -> Self {
        Self {
            inner,
            cancel_on_read: Some(handle),
            ..Self::default()
        }
    }
}

impl SatEngine for RecordingEngine {
    fn new_var(&mut self, external: bool) -> Var {
        let var = self.inner.new_var(external);
        self.new_vars.push((var, external));
        var
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        self.clauses.push(lits.to_vec());
        if let Some((n, handle)) = &self.cancel_at {
            if self.clauses.len() == *n {
                handle.cancel();
            }
        }
        self.inner.add_clause(lits);
    }

    fn num_vars(&self) -> usize {
        self.inner.num_vars()
    }

    fn value(&self, var: Var) -> LBool {
        if let Some(handle) = &self.cancel_on_read {
            handle.cancel();
        }
        self.inner.value(var)
    }

    fn is_inconsistent(&self) -> bool {
        self.inner.is_inconsistent()
    }

    fn binary_clauses(&self, learned: bool) -> Vec<(Lit, Lit)> {
        self.inner.binary_clauses(learned)
    }

    fn clauses(&self, origin: ClauseOrigin) -> Box<dyn Iterator<Item = &[Lit]> + '_> {
        self.inner.clauses(origin)
    }

    fn reconstruction_log(&self) -> &ReconstructionLog {
        self.inner.reconstruction_log()
    }

    fn memory_usage(&self) -> u64 {
        self.inner.memory_usage()
    }
}

/// All full assignments of `n` variables.
pub fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
    (0u64..1 << n).map(move |bits| (0..n).map(|i| (bits >> i) & 1 == 1).collect())
}

/// Check whether `store` has a model, optionally with some variables fixed.
pub fn satisfiable_with(store: &ClauseStore, fixed: &[(Var, bool)]) -> bool {
    assignments(store.num_vars()).any(|values| {
        fixed.iter().all(|&(v, b)| values[v.index()] == b) && store.is_model(&values)
    })
}

/// Check whether `store` has a model.
pub fn satisfiable(store: &ClauseStore) -> bool {
    satisfiable_with(store, &[])
}

/// Evaluate a quantifier-free boolean formula under an assignment of its
/// atoms.
pub fn eval(tm: &TermManager, formula: TermId, atoms: &[TermId], values: &[bool]) -> bool {
    let mut model = Model::new();
    for (&atom, &value) in atoms.iter().zip(values) {
        model.assign_bool(atom, value);
    }
    ModelEvaluator::new(tm, &model)
        .eval_bool(formula)
        .unwrap_or_else(|| panic!("{} is undecided", tm.display(formula)))
}

/// Check whether some assignment of `atoms` satisfies every formula.
pub fn brute_force_sat(tm: &TermManager, formulas: &[TermId], atoms: &[TermId]) -> bool {
    assignments(atoms.len()).any(|values| formulas.iter().all(|&f| eval(tm, f, atoms, &values)))
}

/// `n` boolean constants named `prefix0`, `prefix1`, ...
pub fn bool_consts(tm: &mut TermManager, prefix: &str, n: usize) -> Vec<TermId> {
    let bool_sort = tm.sorts.bool_sort;
    (0..n)
        .map(|i| tm.mk_var(&format!("{prefix}{i}"), bool_sort))
        .collect()
}

//! Property-based tests for the clause store
//!
//! Tests:
//! - Normalization and root propagation keep the set of models
//! - An inconsistent store has no models
//! - Root assignments are implied by the input

use super::*;
use satbridge_sat::{ClauseStore, SatEngine};

fn load(clauses: &[Vec<Lit>]) -> ClauseStore {
    let mut store = ClauseStore::new();
    for _ in 0..MAX_VARS {
        store.new_var(false);
    }
    for c in clauses {
        store.add_clause(c);
    }
    store
}

proptest! {
    /// The store accepts exactly the assignments that satisfy the input
    #[test]
    fn store_models_match_input(clauses in cnf()) {
        let store = load(&clauses);
        for values in assignments(MAX_VARS as usize) {
            prop_assert_eq!(store.is_model(&values), satisfies(&clauses, &values));
        }
    }

    /// Inconsistency is only reported for unsatisfiable input
    #[test]
    fn inconsistency_is_sound(clauses in cnf()) {
        let store = load(&clauses);
        if store.is_inconsistent() {
            prop_assert!(assignments(MAX_VARS as usize).all(|v| !satisfies(&clauses, &v)));
        }
    }

    /// Every root-level value holds in every model of the input
    #[test]
    fn root_values_are_implied(clauses in cnf()) {
        let store = load(&clauses);
        prop_assume!(!store.is_inconsistent());
        for values in assignments(MAX_VARS as usize).filter(|v| satisfies(&clauses, v)) {
            for v in 0..MAX_VARS {
                if let Some(b) = store.value(Var(v)).to_bool() {
                    prop_assert_eq!(values[v as usize], b);
                }
            }
        }
    }

    /// Adding clauses in two batches gives the same models as one batch
    #[test]
    fn insertion_is_incremental(first in cnf(), second in cnf()) {
        let mut store = load(&first);
        for c in &second {
            store.add_clause(c);
        }
        let all: Vec<Vec<Lit>> = first.iter().chain(&second).cloned().collect();
        for values in assignments(MAX_VARS as usize) {
            prop_assert_eq!(store.is_model(&values), satisfies(&all, &values));
        }
    }
}

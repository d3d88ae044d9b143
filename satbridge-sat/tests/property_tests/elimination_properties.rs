//! Property-based tests for bounded variable elimination
//!
//! Tests:
//! - External variables survive elimination
//! - Models of the reduced clauses lift to models of the input
//! - Elimination preserves satisfiability

use super::*;
use satbridge_sat::{ClauseStore, EliminationConfig, LBool, SatEngine, VariableEliminator};

fn load(clauses: &[Vec<Lit>], external: &[bool]) -> ClauseStore {
    let mut store = ClauseStore::new();
    for &ext in external {
        store.new_var(ext);
    }
    for c in clauses {
        store.add_clause(c);
    }
    store
}

fn external_flags() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), MAX_VARS as usize)
}

fn eliminator(max_growth: usize) -> VariableEliminator {
    VariableEliminator::new(EliminationConfig {
        max_growth,
        ..EliminationConfig::default()
    })
}

fn lift(store: &ClauseStore, values: &[bool]) -> Vec<bool> {
    let mut model: Vec<LBool> = values
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if store.is_eliminated(Var(i as u32)) {
                LBool::Undef
            } else {
                LBool::from_bool(b)
            }
        })
        .collect();
    store.reconstruction_log().apply(&mut model);
    model.iter().map(|v| v.is_true()).collect()
}

proptest! {
    /// Only internal variables are eliminated, and they leave every clause
    #[test]
    fn external_vars_survive(clauses in cnf(), external in external_flags(), growth in 0usize..3) {
        let mut store = load(&clauses, &external);
        let eliminated = eliminator(growth).eliminate(&mut store);
        for &v in &eliminated {
            prop_assert!(!external[v.index()]);
            prop_assert!(store.is_eliminated(v));
        }
        for (a, b) in store.binary_clauses(false) {
            prop_assert!(!store.is_eliminated(a.var()) && !store.is_eliminated(b.var()));
        }
        for c in store.original_clauses() {
            prop_assert!(c.iter().all(|l| !store.is_eliminated(l.var())));
        }
        prop_assert_eq!(store.reconstruction_log().len(), eliminated.len());
    }

    /// Replaying the log turns any model of the reduced store into a model of the input
    #[test]
    fn reconstruction_lifts_models(clauses in cnf(), external in external_flags(), growth in 0usize..3) {
        let mut store = load(&clauses, &external);
        eliminator(growth).eliminate(&mut store);
        for values in assignments(MAX_VARS as usize).filter(|v| store.is_model(v)) {
            let lifted = lift(&store, &values);
            prop_assert!(satisfies(&clauses, &lifted), "{:?} lifted to {:?}", values, lifted);
            for v in 0..MAX_VARS as usize {
                if !store.is_eliminated(Var(v as u32)) {
                    prop_assert_eq!(lifted[v], values[v]);
                }
            }
        }
    }

    /// The reduced store is satisfiable exactly when the input is
    #[test]
    fn elimination_preserves_satisfiability(clauses in cnf(), external in external_flags(), growth in 0usize..3) {
        let mut store = load(&clauses, &external);
        eliminator(growth).eliminate(&mut store);
        let reduced_sat = assignments(MAX_VARS as usize).any(|v| store.is_model(&v));
        let input_sat = assignments(MAX_VARS as usize).any(|v| satisfies(&clauses, &v));
        prop_assert_eq!(reduced_sat, input_sat);
    }
}

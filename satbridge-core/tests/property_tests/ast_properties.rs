//! Property-based tests for AST operations
//!
//! This module tests fundamental properties of the term manager such as:
//! - Term construction and uniqueness
//! - Fresh constant naming
//! - Printing of deep terms

use proptest::prelude::*;
use satbridge_core::ast::{TermId, TermKind, TermManager};

/// Strategy for generating small integers
fn small_int_strategy() -> impl Strategy<Value = i64> {
    -100i64..100i64
}

/// Strategy for generating variable names
fn var_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][0-9]?".prop_map(|s| s.to_string())
}

proptest! {
    // =====================================
    // Term Construction Properties
    // =====================================

    /// Creating the same integer constant twice yields the same TermId
    #[test]
    fn integer_constant_uniqueness(n in small_int_strategy()) {
        let mut tm = TermManager::new();
        let t1 = tm.mk_int(n);
        let t2 = tm.mk_int(n);
        prop_assert_eq!(t1, t2);
    }

    /// Boolean constants are fixed terms
    #[test]
    fn boolean_constant_uniqueness(b in proptest::bool::ANY) {
        let tm = TermManager::new();
        prop_assert_eq!(tm.mk_bool(b), tm.mk_bool(b));
        prop_assert_ne!(tm.mk_bool(b), tm.mk_bool(!b));
    }

    /// Variables with the same name and sort have the same TermId
    #[test]
    fn variable_uniqueness(name in var_name_strategy()) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.int_sort;
        let v1 = tm.mk_var(&name, sort);
        let v2 = tm.mk_var(&name, sort);
        prop_assert_eq!(v1, v2);
        prop_assert_eq!(tm.name_of(v1), Some(name.as_str()));
    }

    /// Same name under different sorts gives different terms
    #[test]
    fn variable_sort_distinguishes(name in var_name_strategy()) {
        let mut tm = TermManager::new();
        let b = tm.mk_var(&name, tm.sorts.bool_sort);
        let i = tm.mk_var(&name, tm.sorts.int_sort);
        prop_assert_ne!(b, i);
        prop_assert!(tm.is_bool_const(b));
        prop_assert!(!tm.is_bool_const(i));
        prop_assert!(tm.is_uninterp_const(i));
    }

    /// Double negation is not simplified
    #[test]
    fn double_negation_is_kept(b in proptest::bool::ANY) {
        let mut tm = TermManager::new();
        let t = tm.mk_bool(b);
        let not_t = tm.mk_not(t);
        let not_not_t = tm.mk_not(not_t);
        prop_assert_ne!(not_not_t, t);
        prop_assert_eq!(tm.get(not_not_t).map(|term| term.kind.clone()), Some(TermKind::Not(not_t)));
    }

    /// Disjunctions with the same arguments are shared, argument order matters
    #[test]
    fn or_hash_consing(names in prop::collection::vec(var_name_strategy(), 2..6)) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bool_sort;
        let args: Vec<TermId> = names.iter().map(|n| tm.mk_var(n, sort)).collect();
        let o1 = tm.mk_or(args.clone());
        let o2 = tm.mk_or(args.clone());
        prop_assert_eq!(o1, o2);

        let mut reversed = args.clone();
        reversed.reverse();
        if reversed != args {
            prop_assert_ne!(tm.mk_or(reversed), o1);
        }
    }

    // =====================================
    // Fresh Constants
    // =====================================

    /// Fresh constants never collide with existing names
    #[test]
    fn fresh_constants_are_new(taken in prop::collection::vec(0u32..8, 0..8), n in 1usize..10) {
        let mut tm = TermManager::new();
        let sort = tm.sorts.bool_sort;
        let mut existing: Vec<TermId> = taken
            .iter()
            .map(|i| tm.mk_var(&format!("k!{i}"), sort))
            .collect();
        for _ in 0..n {
            let fresh = tm.mk_fresh_const("k", sort);
            prop_assert!(!existing.contains(&fresh));
            existing.push(fresh);
        }
    }

    // =====================================
    // Printing
    // =====================================

    /// Printing a negation chain does not depend on native recursion
    #[test]
    fn deep_negation_prints(depth in 1usize..5000) {
        let mut tm = TermManager::new();
        let mut t = tm.mk_var("p", tm.sorts.bool_sort);
        for _ in 0..depth {
            t = tm.mk_not(t);
        }
        let shown = tm.display(t);
        prop_assert_eq!(shown.matches("(not ").count(), depth);
        prop_assert!(shown.ends_with(&")".repeat(depth)));
    }
}

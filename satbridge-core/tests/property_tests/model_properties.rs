//! Property-based tests for models and evaluation
//!
//! Tests:
//! - Partial evaluation only decides what every completion agrees on
//! - Checkpoints report cancellation before the memory cap

use proptest::prelude::*;
use satbridge_core::{BridgeError, CancelHandle, Model, ModelEvaluator, TermId, TermManager};

const NUM_ATOMS: usize = 3;

#[derive(Debug, Clone)]
enum Shape {
    Atom(usize),
    Not(Box<Shape>),
    Or(Vec<Shape>),
    Iff(Box<Shape>, Box<Shape>),
    Ite(Box<Shape>, Box<Shape>, Box<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    (0..NUM_ATOMS)
        .prop_map(Shape::Atom)
        .prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(|s| Shape::Not(Box::new(s))),
                prop::collection::vec(inner.clone(), 1..4).prop_map(Shape::Or),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Shape::Iff(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone(), inner)
                    .prop_map(|(c, t, e)| Shape::Ite(Box::new(c), Box::new(t), Box::new(e))),
            ]
        })
}

fn build(tm: &mut TermManager, atoms: &[TermId], shape: &Shape) -> TermId {
    match shape {
        Shape::Atom(i) => atoms[*i],
        Shape::Not(a) => {
            let a = build(tm, atoms, a);
            tm.mk_not(a)
        }
        Shape::Or(args) => {
            let args: Vec<TermId> = args.iter().map(|a| build(tm, atoms, a)).collect();
            tm.mk_or(args)
        }
        Shape::Iff(a, b) => {
            let (a, b) = (build(tm, atoms, a), build(tm, atoms, b));
            tm.mk_iff(a, b)
        }
        Shape::Ite(c, t, e) => {
            let (c, t, e) = (build(tm, atoms, c), build(tm, atoms, t), build(tm, atoms, e));
            tm.mk_ite(c, t, e)
        }
    }
}

fn direct(shape: &Shape, values: &[bool]) -> bool {
    match shape {
        Shape::Atom(i) => values[*i],
        Shape::Not(a) => !direct(a, values),
        Shape::Or(args) => args.iter().any(|a| direct(a, values)),
        Shape::Iff(a, b) => direct(a, values) == direct(b, values),
        Shape::Ite(c, t, e) => {
            if direct(c, values) {
                direct(t, values)
            } else {
                direct(e, values)
            }
        }
    }
}

proptest! {
    /// Under a full assignment the evaluator agrees with direct evaluation
    #[test]
    fn full_assignment_decides(s in shape(), values in prop::collection::vec(any::<bool>(), NUM_ATOMS)) {
        let mut tm = TermManager::new();
        let atoms: Vec<TermId> = (0..NUM_ATOMS)
            .map(|i| tm.mk_var(&format!("p{i}"), tm.sorts.bool_sort))
            .collect();
        let f = build(&mut tm, &atoms, &s);

        let mut model = Model::new();
        for (&atom, &value) in atoms.iter().zip(&values) {
            model.assign_bool(atom, value);
        }
        prop_assert_eq!(ModelEvaluator::new(&tm, &model).eval_bool(f), Some(direct(&s, &values)));
    }

    /// A value decided under a partial model holds in every completion
    #[test]
    fn partial_evaluation_is_sound(
        s in shape(),
        partial in prop::collection::vec(prop::option::of(any::<bool>()), NUM_ATOMS),
    ) {
        let mut tm = TermManager::new();
        let atoms: Vec<TermId> = (0..NUM_ATOMS)
            .map(|i| tm.mk_var(&format!("p{i}"), tm.sorts.bool_sort))
            .collect();
        let f = build(&mut tm, &atoms, &s);

        let mut model = Model::new();
        for (&atom, value) in atoms.iter().zip(&partial) {
            if let Some(v) = value {
                model.assign_bool(atom, *v);
            }
        }
        let Some(decided) = ModelEvaluator::new(&tm, &model).eval_bool(f) else {
            return Ok(());
        };
        for bits in 0u32..1 << NUM_ATOMS {
            let completion: Vec<bool> = partial
                .iter()
                .enumerate()
                .map(|(i, v)| v.unwrap_or((bits >> i) & 1 == 1))
                .collect();
            prop_assert_eq!(direct(&s, &completion), decided);
        }
    }

    /// Cancellation wins over the memory cap, and clears with the call
    #[test]
    fn checkpoint_reports_cancel_first(used in 0u64..1000, limit in 0u64..1000) {
        let handle = CancelHandle::new();
        {
            let call = handle.activate();
            let mut checkpoint = call.checkpoint(Some(limit));
            let expected = if used > limit {
                Err(BridgeError::ResourceExceeded { used, limit })
            } else {
                Ok(())
            };
            prop_assert_eq!(checkpoint.check(used), expected);
            handle.cancel();
            prop_assert_eq!(checkpoint.check(used), Err(BridgeError::Cancelled));
        }
        prop_assert!(!handle.is_active());
    }
}

//! Property-based tests for satbridge-cnf
//!
//! Random boolean skeletons over a handful of constants, checked against
//! direct evaluation.

mod roundtrip_properties;

use proptest::prelude::*;
use satbridge_core::{TermId, TermManager};

pub const NUM_ATOMS: usize = 4;

/// Shape of a random formula, built into a term manager afterwards.
#[derive(Debug, Clone)]
pub enum Shape {
    Atom(usize),
    Const(bool),
    Not(Box<Shape>),
    Or(Vec<Shape>),
    Iff(Box<Shape>, Box<Shape>),
    Eq(Box<Shape>, Box<Shape>),
    Ite(Box<Shape>, Box<Shape>, Box<Shape>),
}

pub fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        6 => (0..NUM_ATOMS).prop_map(Shape::Atom),
        1 => any::<bool>().prop_map(Shape::Const),
    ];
    leaf.prop_recursive(5, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Not(Box::new(s))),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Shape::Or),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Iff(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Eq(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(c, t, e)| Shape::Ite(Box::new(c), Box::new(t), Box::new(e))),
        ]
    })
}

pub fn atoms(tm: &mut TermManager) -> Vec<TermId> {
    let bool_sort = tm.sorts.bool_sort;
    (0..NUM_ATOMS)
        .map(|i| tm.mk_var(&format!("a{i}"), bool_sort))
        .collect()
}

pub fn build(tm: &mut TermManager, atoms: &[TermId], shape: &Shape) -> TermId {
    match shape {
        Shape::Atom(i) => atoms[*i],
        Shape::Const(b) => tm.mk_bool(*b),
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
        Shape::Eq(a, b) => {
            let (a, b) = (build(tm, atoms, a), build(tm, atoms, b));
            tm.mk_eq(a, b)
        }
        Shape::Ite(c, t, e) => {
            let (c, t, e) = (build(tm, atoms, c), build(tm, atoms, t), build(tm, atoms, e));
            tm.mk_ite(c, t, e)
        }
    }
}

/// All full assignments of `n` variables.
pub fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
    (0u64..1 << n).map(move |bits| (0..n).map(|i| (bits >> i) & 1 == 1).collect())
}

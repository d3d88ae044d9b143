//! Boolean interface collection.
//!
//! An uninterpreted constant is part of the boolean interface when it occurs
//! somewhere other than the boolean skeleton of the input, typically as an
//! argument of a theory atom such as `(P b)` or `(= x (ite b 1 2))`. Another
//! component interprets those occurrences later, so the encoder must give the
//! constant an external SAT variable that preprocessing may not eliminate.

use crate::encoder::{Node, classify};
use rustc_hash::FxHashSet;
use satbridge_core::{TermId, TermManager};

/// Collect the boolean interface of a batch of formulas.
///
/// The boolean skeleton (`not`, `or`, `iff`, and `=`/`ite` over booleans) is
/// walked; every other node is scanned in full, quantifier bodies included,
/// and the boolean constants found there are returned. Each node is
/// visited at most once.
#[must_use]
pub fn collect_boolean_interface(tm: &TermManager, formulas: &[TermId]) -> FxHashSet<TermId> {
    let mut interface = FxHashSet::default();
    let mut visited = FxHashSet::default();
    let mut scanned = FxHashSet::default();
    let mut todo = Vec::new();

    for &f in formulas {
        if !visited.insert(f) {
            continue;
        }
        todo.push(f);
        while let Some(t) = todo.pop() {
            if tm.is_uninterp_const(t) {
                continue;
            }
            match classify(tm, t) {
                Node::Not(a) => push_unvisited(&mut visited, &mut todo, &[a]),
                Node::Or(args) => push_unvisited(&mut visited, &mut todo, args),
                Node::Iff(a, b) => push_unvisited(&mut visited, &mut todo, &[a, b]),
                Node::Ite(c, th, el) => push_unvisited(&mut visited, &mut todo, &[c, th, el]),
                Node::Const(_) => {}
                Node::Atom | Node::Unsupported(_) => {
                    scan_constants(tm, t, &mut scanned, &mut interface);
                }
            }
        }
    }
    interface
}

fn push_unvisited(visited: &mut FxHashSet<TermId>, todo: &mut Vec<TermId>, args: &[TermId]) {
    for &arg in args {
        if visited.insert(arg) {
            todo.push(arg);
        }
    }
}

fn scan_constants(
    tm: &TermManager,
    root: TermId,
    scanned: &mut FxHashSet<TermId>,
    out: &mut FxHashSet<TermId>,
) {
    if !scanned.insert(root) {
        return;
    }
    let mut stack = vec![root];
    while let Some(t) = stack.pop() {
        let Some(term) = tm.get(t) else {
            continue;
        };
        if tm.is_uninterp_const(t) {
            if tm.is_bool(t) {
                out.insert(t);
            }
            continue;
        }
        for child in term.kind.children() {
            if scanned.insert(child) {
                stack.push(child);
            }
        }
    }
}

//! Models and partial model evaluation.
//!
//! A [`Model`] assigns values to uninterpreted constants and, optionally, to
//! ground applications of uninterpreted functions. [`ModelEvaluator`]
//! evaluates a term without model completion: anything it cannot decide from
//! the assignments present is reported as unknown (`None`).

use crate::ast::{TermId, TermKind, TermManager};
use rustc_hash::FxHashMap;

/// A value in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
}

impl Value {
    /// The boolean payload, if any.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Int(_) => None,
        }
    }

    /// The integer payload, if any.
    #[must_use]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            Value::Bool(_) => None,
        }
    }
}

/// Assignment of values to constants and ground applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    assignments: FxHashMap<TermId, Value>,
}

impl Model {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a constant or ground application.
    pub fn assign(&mut self, term: TermId, value: Value) {
        self.assignments.insert(term, value);
    }

    /// Assign a boolean value.
    pub fn assign_bool(&mut self, term: TermId, value: bool) {
        self.assign(term, Value::Bool(value));
    }

    /// Look up the value assigned to a term.
    #[must_use]
    pub fn get(&self, term: TermId) -> Option<Value> {
        self.assignments.get(&term).copied()
    }

    /// Look up a boolean value.
    #[must_use]
    pub fn get_bool(&self, term: TermId) -> Option<bool> {
        self.get(term).and_then(Value::as_bool)
    }

    /// Remove an assignment, returning the old value.
    pub fn remove(&mut self, term: TermId) -> Option<Value> {
        self.assignments.remove(&term)
    }

    /// Check whether a term is assigned.
    #[must_use]
    pub fn contains(&self, term: TermId) -> bool {
        self.assignments.contains_key(&term)
    }

    /// Number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Check if the model is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterate over all assignments (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (TermId, Value)> + '_ {
        self.assignments.iter().map(|(&t, &v)| (t, v))
    }
}

/// Evaluates terms against a model without completing it.
///
/// Connectives follow three-valued semantics: `(or a b)` is true as soon as
/// one side is true even if the other is unknown. Quantifiers always evaluate
/// to unknown.
pub struct ModelEvaluator<'a> {
    tm: &'a TermManager,
    model: &'a Model,
    cache: FxHashMap<TermId, Option<Value>>,
}

impl<'a> ModelEvaluator<'a> {
    /// Create an evaluator over a model.
    #[must_use]
    pub fn new(tm: &'a TermManager, model: &'a Model) -> Self {
        Self {
            tm,
            model,
            cache: FxHashMap::default(),
        }
    }

    /// Evaluate a term to a boolean, if decidable.
    pub fn eval_bool(&mut self, term: TermId) -> Option<bool> {
        self.eval(term).and_then(Value::as_bool)
    }

    /// Evaluate a term.
    ///
    /// Sub-terms are evaluated with an explicit post-order work list and
    /// memoized for the lifetime of the evaluator.
    pub fn eval(&mut self, root: TermId) -> Option<Value> {
        if let Some(&v) = self.cache.get(&root) {
            return v;
        }
        let tm = self.tm;
        let mut todo: Vec<(TermId, bool)> = vec![(root, false)];
        while let Some((id, expanded)) = todo.pop() {
            if self.cache.contains_key(&id) {
                continue;
            }
            let Some(term) = tm.get(id) else {
                self.cache.insert(id, None);
                continue;
            };
            // quantifier bodies are never evaluated
            let children = match term.kind {
                TermKind::Forall { .. } => Default::default(),
                ref kind => kind.children(),
            };
            if !expanded {
                todo.push((id, true));
                for child in children.into_iter().rev() {
                    if !self.cache.contains_key(&child) {
                        todo.push((child, false));
                    }
                }
                continue;
            }
            let value = self.eval_node(id);
            self.cache.insert(id, value);
        }
        self.cache.get(&root).copied().flatten()
    }

    fn child(&self, id: TermId) -> Option<Value> {
        self.cache.get(&id).copied().flatten()
    }

    fn child_bool(&self, id: TermId) -> Option<bool> {
        self.child(id).and_then(Value::as_bool)
    }

    fn child_int(&self, id: TermId) -> Option<i64> {
        self.child(id).and_then(Value::as_int)
    }

    fn eval_node(&self, id: TermId) -> Option<Value> {
        let term = self.tm.get(id)?;
        let b = |v: Option<bool>| v.map(Value::Bool);
        match &term.kind {
            TermKind::True => Some(Value::Bool(true)),
            TermKind::False => Some(Value::Bool(false)),
            TermKind::IntConst(n) => Some(Value::Int(*n)),
            TermKind::Var(_) => self.model.get(id),
            TermKind::Apply { .. } => self.model.get(id),
            TermKind::Forall { .. } => None,
            TermKind::Not(a) => b(self.child_bool(*a).map(|v| !v)),
            TermKind::And(args) => {
                let mut unknown = false;
                for &a in args {
                    match self.child_bool(a) {
                        Some(false) => return Some(Value::Bool(false)),
                        Some(true) => {}
                        None => unknown = true,
                    }
                }
                if unknown { None } else { Some(Value::Bool(true)) }
            }
            TermKind::Or(args) => {
                let mut unknown = false;
                for &a in args {
                    match self.child_bool(a) {
                        Some(true) => return Some(Value::Bool(true)),
                        Some(false) => {}
                        None => unknown = true,
                    }
                }
                if unknown { None } else { Some(Value::Bool(false)) }
            }
            TermKind::Xor(x, y) => {
                b(self.child_bool(*x).zip(self.child_bool(*y)).map(|(x, y)| x != y))
            }
            TermKind::Implies(x, y) => match (self.child_bool(*x), self.child_bool(*y)) {
                (Some(false), _) | (_, Some(true)) => Some(Value::Bool(true)),
                (Some(true), Some(false)) => Some(Value::Bool(false)),
                _ => None,
            },
            TermKind::Iff(x, y) | TermKind::Eq(x, y) => {
                let (x, y) = (self.child(*x)?, self.child(*y)?);
                Some(Value::Bool(x == y))
            }
            TermKind::Distinct(args) => {
                let mut values = Vec::with_capacity(args.len());
                for &a in args {
                    values.push(self.child(a)?);
                }
                let all_distinct = values
                    .iter()
                    .enumerate()
                    .all(|(i, v)| values[i + 1..].iter().all(|w| w != v));
                Some(Value::Bool(all_distinct))
            }
            TermKind::Ite(c, t, e) => match self.child_bool(*c) {
                Some(true) => self.child(*t),
                Some(false) => self.child(*e),
                None => {
                    let (t, e) = (self.child(*t)?, self.child(*e)?);
                    if t == e { Some(t) } else { None }
                }
            },
            TermKind::Le(x, y) => b(self.child_int(*x).zip(self.child_int(*y)).map(|(x, y)| x <= y)),
            TermKind::Lt(x, y) => b(self.child_int(*x).zip(self.child_int(*y)).map(|(x, y)| x < y)),
        }
    }
}

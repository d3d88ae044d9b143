//! Hash-consed terms.
//!
//! Every structurally distinct term is stored once in the [`TermManager`] and
//! referred to by a [`TermId`]. Two terms built from the same kind, children
//! and sort always receive the same identifier, so identity comparison is
//! structural comparison and shared sub-terms form a DAG.
//!
//! The `mk_*` constructors never simplify: `(not (not p))` stays a double
//! negation. Rewriting belongs to callers that run before the CNF layer.

use crate::sort::{SortId, SortKind, SortManager};
use lasso::{Rodeo, Spur};
use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use std::fmt::Write as _;

/// Identifier of an interned term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub u32);

impl TermId {
    /// Create a term id from a raw index.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Index into the term table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Argument list of an n-ary term.
pub type TermArgs = SmallVec<[TermId; 4]>;

/// The shape of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Boolean true
    True,
    /// Boolean false
    False,
    /// Uninterpreted constant
    Var(Spur),
    /// Integer literal
    IntConst(i64),
    /// Negation
    Not(TermId),
    /// N-ary conjunction
    And(TermArgs),
    /// N-ary disjunction
    Or(TermArgs),
    /// Exclusive or
    Xor(TermId, TermId),
    /// Implication
    Implies(TermId, TermId),
    /// Boolean equivalence
    Iff(TermId, TermId),
    /// Equality (any sort)
    Eq(TermId, TermId),
    /// Pairwise distinctness
    Distinct(TermArgs),
    /// If-then-else
    Ite(TermId, TermId, TermId),
    /// Integer `<=`
    Le(TermId, TermId),
    /// Integer `<`
    Lt(TermId, TermId),
    /// Application of an uninterpreted function
    Apply {
        /// Function symbol
        func: Spur,
        /// Arguments
        args: TermArgs,
    },
    /// Universal quantifier
    Forall {
        /// Bound variables with their sorts
        vars: SmallVec<[(Spur, SortId); 2]>,
        /// Body
        body: TermId,
    },
}

impl TermKind {
    /// Direct sub-terms, left to right.
    #[must_use]
    pub fn children(&self) -> TermArgs {
        match self {
            TermKind::True | TermKind::False | TermKind::Var(_) | TermKind::IntConst(_) => {
                SmallVec::new()
            }
            TermKind::Not(a) => smallvec![*a],
            TermKind::Forall { body, .. } => smallvec![*body],
            TermKind::And(args)
            | TermKind::Or(args)
            | TermKind::Distinct(args)
            | TermKind::Apply { args, .. } => args.clone(),
            TermKind::Xor(a, b)
            | TermKind::Implies(a, b)
            | TermKind::Iff(a, b)
            | TermKind::Eq(a, b)
            | TermKind::Le(a, b)
            | TermKind::Lt(a, b) => smallvec![*a, *b],
            TermKind::Ite(c, t, e) => smallvec![*c, *t, *e],
        }
    }
}

/// An interned term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Identifier of this term
    pub id: TermId,
    /// Shape
    pub kind: TermKind,
    /// Sort
    pub sort: SortId,
}

/// Owner of all terms, names and sorts.
#[derive(Debug)]
pub struct TermManager {
    terms: Vec<Term>,
    index: FxHashMap<(TermKind, SortId), TermId>,
    names: Rodeo,
    fresh_counter: u32,
    /// Sort table
    pub sorts: SortManager,
}

impl TermManager {
    /// Create an empty term manager.
    #[must_use]
    pub fn new() -> Self {
        let mut tm = Self {
            terms: Vec::new(),
            index: FxHashMap::default(),
            names: Rodeo::default(),
            fresh_counter: 0,
            sorts: SortManager::new(),
        };
        // true/false get the first two ids so `mk_true` can stay `&self`
        let bool_sort = tm.sorts.bool_sort;
        tm.intern(TermKind::True, bool_sort);
        tm.intern(TermKind::False, bool_sort);
        tm
    }

    fn intern(&mut self, kind: TermKind, sort: SortId) -> TermId {
        let key = (kind, sort);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = TermId(self.terms.len() as u32);
        self.terms.push(Term {
            id,
            kind: key.0.clone(),
            sort,
        });
        self.index.insert(key, id);
        id
    }

    /// Number of interned terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the manager holds no term (never true after `new`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Look up a term.
    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.index())
    }

    /// Resolve an interned name.
    #[must_use]
    pub fn resolve(&self, name: Spur) -> &str {
        self.names.resolve(&name)
    }

    /// Name of an uninterpreted constant.
    #[must_use]
    pub fn name_of(&self, id: TermId) -> Option<&str> {
        match self.get(id)?.kind {
            TermKind::Var(name) => Some(self.names.resolve(&name)),
            _ => None,
        }
    }

    /// Check whether a term has boolean sort.
    #[must_use]
    pub fn is_bool(&self, id: TermId) -> bool {
        self.get(id).is_some_and(|t| t.sort == self.sorts.bool_sort)
    }

    /// Check whether a term is an uninterpreted constant (of any sort).
    #[must_use]
    pub fn is_uninterp_const(&self, id: TermId) -> bool {
        self.get(id).is_some_and(|t| matches!(t.kind, TermKind::Var(_)))
    }

    /// Check whether a term is an uninterpreted constant of boolean sort.
    #[must_use]
    pub fn is_bool_const(&self, id: TermId) -> bool {
        self.is_uninterp_const(id) && self.is_bool(id)
    }

    // ===== constructors =====

    /// The constant `true`.
    #[must_use]
    pub fn mk_true(&self) -> TermId {
        TermId(0)
    }

    /// The constant `false`.
    #[must_use]
    pub fn mk_false(&self) -> TermId {
        TermId(1)
    }

    /// A boolean constant.
    #[must_use]
    pub fn mk_bool(&self, value: bool) -> TermId {
        if value { self.mk_true() } else { self.mk_false() }
    }

    /// Declare (or look up) an uninterpreted sort.
    pub fn mk_uninterpreted_sort(&mut self, name: &str) -> SortId {
        let name = self.names.get_or_intern(name);
        self.sorts.intern(SortKind::Uninterpreted(name))
    }

    /// An uninterpreted constant. Same name and sort give the same term.
    pub fn mk_var(&mut self, name: &str, sort: SortId) -> TermId {
        let name = self.names.get_or_intern(name);
        self.intern(TermKind::Var(name), sort)
    }

    /// A constant whose name has never been interned before.
    pub fn mk_fresh_const(&mut self, prefix: &str, sort: SortId) -> TermId {
        loop {
            let candidate = format!("{}!{}", prefix, self.fresh_counter);
            self.fresh_counter += 1;
            if self.names.get(&candidate).is_none() {
                return self.mk_var(&candidate, sort);
            }
        }
    }

    /// An integer literal.
    pub fn mk_int(&mut self, value: i64) -> TermId {
        let sort = self.sorts.int_sort;
        self.intern(TermKind::IntConst(value), sort)
    }

    /// Negation.
    pub fn mk_not(&mut self, arg: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Not(arg), sort)
    }

    /// Conjunction.
    pub fn mk_and(&mut self, args: impl IntoIterator<Item = TermId>) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::And(args.into_iter().collect()), sort)
    }

    /// Disjunction.
    pub fn mk_or(&mut self, args: impl IntoIterator<Item = TermId>) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Or(args.into_iter().collect()), sort)
    }

    /// Exclusive or.
    pub fn mk_xor(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Xor(lhs, rhs), sort)
    }

    /// Implication.
    pub fn mk_implies(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Implies(lhs, rhs), sort)
    }

    /// Boolean equivalence.
    pub fn mk_iff(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Iff(lhs, rhs), sort)
    }

    /// Equality.
    pub fn mk_eq(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Eq(lhs, rhs), sort)
    }

    /// Pairwise distinctness.
    pub fn mk_distinct(&mut self, args: impl IntoIterator<Item = TermId>) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Distinct(args.into_iter().collect()), sort)
    }

    /// If-then-else. The result takes the sort of the `then` branch.
    pub fn mk_ite(&mut self, cond: TermId, then_br: TermId, else_br: TermId) -> TermId {
        let sort = self.get(then_br).map_or(self.sorts.bool_sort, |t| t.sort);
        self.intern(TermKind::Ite(cond, then_br, else_br), sort)
    }

    /// Integer `<=`.
    pub fn mk_le(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Le(lhs, rhs), sort)
    }

    /// Integer `<`.
    pub fn mk_lt(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Lt(lhs, rhs), sort)
    }

    /// Application of an uninterpreted function with the given result sort.
    pub fn mk_apply(
        &mut self,
        func: &str,
        args: impl IntoIterator<Item = TermId>,
        sort: SortId,
    ) -> TermId {
        let func = self.names.get_or_intern(func);
        self.intern(
            TermKind::Apply {
                func,
                args: args.into_iter().collect(),
            },
            sort,
        )
    }

    /// Universal quantifier. Occurrences of the bound names in `body` are
    /// ordinary constants with the same name and sort.
    pub fn mk_forall(&mut self, vars: &[(&str, SortId)], body: TermId) -> TermId {
        let vars = vars
            .iter()
            .map(|&(name, sort)| (self.names.get_or_intern(name), sort))
            .collect();
        let sort = self.sorts.bool_sort;
        self.intern(TermKind::Forall { vars, body }, sort)
    }

    // ===== printing =====

    /// Render a term in SMT-LIB syntax.
    ///
    /// Uses an explicit work stack, so arbitrarily deep terms print without
    /// exhausting the call stack.
    #[must_use]
    pub fn display(&self, root: TermId) -> String {
        enum Work<'a> {
            Term(TermId),
            Text(&'a str),
        }

        let mut out = String::new();
        let mut stack = vec![Work::Term(root)];
        while let Some(work) = stack.pop() {
            let id = match work {
                Work::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                Work::Term(id) => id,
            };
            let Some(term) = self.get(id) else {
                let _ = write!(out, "?{}", id.0);
                continue;
            };
            let head = match &term.kind {
                TermKind::True => {
                    out.push_str("true");
                    continue;
                }
                TermKind::False => {
                    out.push_str("false");
                    continue;
                }
                TermKind::Var(name) => {
                    out.push_str(self.names.resolve(name));
                    continue;
                }
                TermKind::IntConst(n) => {
                    if *n < 0 {
                        let _ = write!(out, "(- {})", n.unsigned_abs());
                    } else {
                        let _ = write!(out, "{}", n);
                    }
                    continue;
                }
                TermKind::Forall { vars, .. } => {
                    out.push_str("(forall (");
                    for (i, (name, sort)) in vars.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        let _ = write!(out, "({} {})", self.names.resolve(name), self.sort_name(*sort));
                    }
                    out.push(')');
                    ""
                }
                TermKind::Not(_) => "(not",
                TermKind::And(_) => "(and",
                TermKind::Or(_) => "(or",
                TermKind::Xor(..) => "(xor",
                TermKind::Implies(..) => "(=>",
                TermKind::Iff(..) | TermKind::Eq(..) => "(=",
                TermKind::Distinct(_) => "(distinct",
                TermKind::Ite(..) => "(ite",
                TermKind::Le(..) => "(<=",
                TermKind::Lt(..) => "(<",
                TermKind::Apply { func, .. } => {
                    out.push('(');
                    out.push_str(self.names.resolve(func));
                    ""
                }
            };
            out.push_str(head);
            stack.push(Work::Text(")"));
            for child in term.kind.children().into_iter().rev() {
                stack.push(Work::Term(child));
                stack.push(Work::Text(" "));
            }
        }
        out
    }

    fn sort_name(&self, sort: SortId) -> &str {
        match self.sorts.get(sort).map(|s| s.kind) {
            Some(SortKind::Bool) => "Bool",
            Some(SortKind::Int) => "Int",
            Some(SortKind::Uninterpreted(name)) => self.names.resolve(&name),
            None => "?",
        }
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

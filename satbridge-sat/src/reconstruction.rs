//! Model reconstruction log.
//!
//! Preprocessing that removes a variable together with the clauses it
//! occurs in records the removed clauses here. After search, replaying the
//! log newest-first assigns every eliminated variable a value that satisfies
//! all of its removed clauses, which lifts a model of the reduced formula to
//! a model of the original one.

use crate::literal::{LBool, Lit, Var, lit_value};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::fmt;

/// One elimination step: a variable and the clauses removed with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElimEntry {
    /// The eliminated variable
    pub var: Var,
    /// Clauses that mentioned `var` when it was eliminated
    pub clauses: Vec<SmallVec<[Lit; 4]>>,
}

/// Ordered log of elimination steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructionLog {
    entries: Vec<ElimEntry>,
}

impl ReconstructionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an elimination step.
    pub fn push(&mut self, var: Var, clauses: Vec<SmallVec<[Lit; 4]>>) {
        self.entries.push(ElimEntry { var, clauses });
    }

    /// Recorded steps, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ElimEntry] {
        &self.entries
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All variables mentioned by the log.
    #[must_use]
    pub fn collect_vars(&self) -> FxHashSet<Var> {
        let mut vars = FxHashSet::default();
        for entry in &self.entries {
            vars.insert(entry.var);
            for clause in &entry.clauses {
                vars.extend(clause.iter().map(|l| l.var()));
            }
        }
        vars
    }

    /// Replay the log over `model`, newest step first.
    ///
    /// Each eliminated variable starts out false unless already assigned and
    /// is flipped whenever one of its clauses is not satisfied by the other
    /// literals. `model` grows as needed to cover every logged variable.
    pub fn apply(&self, model: &mut Vec<LBool>) {
        for entry in self.entries.iter().rev() {
            let v = entry.var;
            if model.len() <= v.index() {
                model.resize(v.index() + 1, LBool::Undef);
            }
            if model[v.index()].is_undef() {
                model[v.index()] = LBool::False;
            }
            for clause in &entry.clauses {
                let mut satisfied = false;
                let mut pivot = None;
                for &lit in clause {
                    if lit.var() == v {
                        pivot = Some(lit);
                        continue;
                    }
                    if lit_value(model, lit).is_true() {
                        satisfied = true;
                        break;
                    }
                }
                if satisfied {
                    continue;
                }
                if let Some(lit) = pivot {
                    model[v.index()] = LBool::from_bool(lit.is_pos());
                }
            }
        }
    }
}

impl fmt::Display for ReconstructionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(sat-model-converter")?;
        for entry in &self.entries {
            write!(f, "\n  (elim {}", entry.var)?;
            for clause in &entry.clauses {
                write!(f, " (")?;
                for (i, lit) in clause.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", lit)?;
                }
                write!(f, ")")?;
            }
            write!(f, ")")?;
        }
        write!(f, ")")
    }
}

//! Lifting models back through SAT preprocessing.
//!
//! A model found for decoded formulas speaks about the decoded atoms, proxy
//! constants included, but says nothing about variables the engine
//! eliminated. [`SatModelConverter`] evaluates every variable's atom under
//! the model, replays the engine's reconstruction log over those values,
//! writes the resulting truth values of plain boolean constants back and
//! finally drops the proxies.

use satbridge_core::{Model, ModelEvaluator, TermId, TermManager};
use satbridge_sat::{LBool, ReconstructionLog, Var};
use std::fmt;
use tracing::trace;

/// Model converter produced by the decoder.
#[derive(Debug, Clone, Default)]
pub struct SatModelConverter {
    log: ReconstructionLog,
    var2atom: Vec<TermId>,
    proxies: Vec<TermId>,
}

impl SatModelConverter {
    pub(crate) fn new(log: ReconstructionLog) -> Self {
        Self {
            log,
            var2atom: Vec::new(),
            proxies: Vec::new(),
        }
    }

    /// Register the atom of the next variable.
    pub(crate) fn push_atom(&mut self, atom: TermId, proxy: bool) {
        self.var2atom.push(atom);
        if proxy {
            self.proxies.push(atom);
        }
    }

    /// Atom of every variable, indexed by variable.
    #[must_use]
    pub fn atoms(&self) -> &[TermId] {
        &self.var2atom
    }

    /// Constants introduced by the decoder, removed from converted models.
    #[must_use]
    pub fn proxies(&self) -> &[TermId] {
        &self.proxies
    }

    /// The engine's reconstruction log at decode time.
    #[must_use]
    pub fn log(&self) -> &ReconstructionLog {
        &self.log
    }

    /// Convert `model` in place.
    ///
    /// Atoms are evaluated without model completion, so an atom the model
    /// cannot decide (a quantifier, an unassigned constant) starts out
    /// unknown and reconstruction treats it as not satisfying any clause.
    pub fn apply(&self, model: &mut Model, tm: &TermManager) {
        let mut values: Vec<LBool> = {
            let mut eval = ModelEvaluator::new(tm, model);
            self.var2atom
                .iter()
                .map(|&atom| match eval.eval_bool(atom) {
                    Some(b) => LBool::from_bool(b),
                    None => LBool::Undef,
                })
                .collect()
        };

        self.log.apply(&mut values);

        for (&atom, value) in self.var2atom.iter().zip(&values) {
            if !tm.is_uninterp_const(atom) {
                continue;
            }
            if let Some(b) = value.to_bool() {
                model.assign_bool(atom, b);
            }
        }
        for &proxy in &self.proxies {
            model.remove(proxy);
        }
        trace!(
            atoms = self.var2atom.len(),
            steps = self.log.len(),
            proxies = self.proxies.len(),
            "model converted"
        );
    }

    /// Render the converter with atoms printed through `tm`.
    #[must_use]
    pub fn display<'a>(&'a self, tm: &'a TermManager) -> ConverterDisplay<'a> {
        ConverterDisplay { mc: self, tm }
    }
}

/// [`fmt::Display`] adapter returned by [`SatModelConverter::display`].
pub struct ConverterDisplay<'a> {
    mc: &'a SatModelConverter,
    tm: &'a TermManager,
}

impl fmt::Display for ConverterDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars = self.mc.log.collect_vars();
        let mut logged: Vec<Var> = vars.into_iter().collect();
        logged.sort();

        writeln!(f, "{}", self.mc.log)?;
        write!(f, "(atoms")?;
        for var in logged {
            if let Some(&atom) = self.mc.var2atom.get(var.index()) {
                write!(f, "\n  ({} {})", var, self.tm.display(atom))?;
            }
        }
        writeln!(f, ")")?;
        write!(f, "(model-filter")?;
        for &proxy in &self.mc.proxies {
            write!(f, " {}", self.tm.display(proxy))?;
        }
        write!(f, ")")
    }
}

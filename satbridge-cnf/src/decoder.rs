//! Reading formulas back out of a SAT engine.
//!
//! The decoder turns the engine's root assignment and clause databases into
//! a batch of formulas over the atoms recorded in an [`AtomMap`]. Variables
//! with no recorded atom (definition variables of the encoder, or variables
//! created by the engine itself) are represented by fresh boolean constants.
//! Those proxies are remembered by the optional [`SatModelConverter`] so
//! they can be filtered out of models later.

use crate::atom_map::AtomMap;
use crate::config::DecoderConfig;
use crate::model_converter::SatModelConverter;
use satbridge_core::{CancelHandle, Checkpoint, Result, TermId, TermManager};
use satbridge_sat::{ClauseOrigin, LBool, Lit, SatEngine, Var};
use tracing::{debug, warn};

/// Prefix of the names given to proxy constants.
pub const PROXY_PREFIX: &str = "k";

/// Result of a decode call.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Decoded formulas: units, then binary clauses, then longer clauses
    pub formulas: Vec<TermId>,
    /// Converter for models of `formulas`, when requested
    pub model_converter: Option<SatModelConverter>,
}

/// Extracts formulas from a SAT engine.
#[derive(Debug, Default)]
pub struct Decoder {
    cancel: CancelHandle,
}

impl Decoder {
    /// Create a decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that can cancel the in-flight call from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Set or clear the cancellation flag of the in-flight call, if any.
    pub fn set_cancel(&self, cancel: bool) {
        self.cancel.set_cancel(cancel);
    }

    /// Decode the state of `engine`.
    ///
    /// An inconsistent engine decodes to the single formula `false` and no
    /// model converter.
    ///
    /// # Errors
    ///
    /// [`BridgeError::ResourceExceeded`](satbridge_core::BridgeError::ResourceExceeded)
    /// or [`BridgeError::Cancelled`](satbridge_core::BridgeError::Cancelled);
    /// the partial result is discarded.
    pub fn decode<E: SatEngine + ?Sized>(
        &self,
        tm: &mut TermManager,
        engine: &E,
        map: &AtomMap,
        config: &DecoderConfig,
    ) -> Result<Decoded> {
        let call = self.cancel.activate();
        let mut checkpoint = call.checkpoint(config.max_memory_bytes());

        if engine.is_inconsistent() {
            debug!("engine is inconsistent, decoding to false");
            return Ok(Decoded {
                formulas: vec![tm.mk_false()],
                model_converter: None,
            });
        }
        debug!(
            vars = engine.num_vars(),
            atoms = map.len(),
            learned = config.collect_learned_clauses,
            "decoding engine state"
        );

        let mut run = DecodeRun {
            tm,
            engine,
            lits: Vec::with_capacity(engine.num_vars()),
            formulas: Vec::new(),
            proxies: 0,
        };
        match run.decode(map, config, &mut checkpoint) {
            Ok(model_converter) => {
                debug!(
                    formulas = run.formulas.len(),
                    proxies = run.proxies,
                    "decoding finished"
                );
                Ok(Decoded {
                    formulas: run.formulas,
                    model_converter,
                })
            }
            Err(err) => {
                if err.is_interrupt() {
                    warn!(error = %err, polls = checkpoint.polls(), "decoding aborted");
                }
                Err(err)
            }
        }
    }
}

struct DecodeRun<'a, E: SatEngine + ?Sized> {
    tm: &'a mut TermManager,
    engine: &'a E,
    /// Positive and negative formula of each variable
    lits: Vec<(TermId, TermId)>,
    formulas: Vec<TermId>,
    proxies: usize,
}

impl<E: SatEngine + ?Sized> DecodeRun<'_, E> {
    fn decode(
        &mut self,
        map: &AtomMap,
        config: &DecoderConfig,
        checkpoint: &mut Checkpoint,
    ) -> Result<Option<SatModelConverter>> {
        let engine = self.engine;
        let mut mc = config
            .produce_model_converter
            .then(|| SatModelConverter::new(engine.reconstruction_log().clone()));

        let num_vars = engine.num_vars();
        let inverse = map.inverse(num_vars);
        for slot in inverse {
            checkpoint.check(self.memory_used())?;
            let (atom, proxy) = match slot {
                Some(atom) => (atom, false),
                None => {
                    let bool_sort = self.tm.sorts.bool_sort;
                    self.proxies += 1;
                    (self.tm.mk_fresh_const(PROXY_PREFIX, bool_sort), true)
                }
            };
            let negated = self.tm.mk_not(atom);
            self.lits.push((atom, negated));
            if let Some(mc) = mc.as_mut() {
                mc.push_atom(atom, proxy);
            }
        }

        for v in 0..num_vars as u32 {
            checkpoint.check(self.memory_used())?;
            let var = Var(v);
            let unit = match engine.value(var) {
                LBool::True => self.formula_of(Lit::pos(var)),
                LBool::False => self.formula_of(Lit::neg(var)),
                LBool::Undef => continue,
            };
            self.formulas.push(unit);
        }

        for (a, b) in engine.binary_clauses(config.collect_learned_clauses) {
            checkpoint.check(self.memory_used())?;
            let args = [self.formula_of(a), self.formula_of(b)];
            let or = self.tm.mk_or(args);
            self.formulas.push(or);
        }

        self.push_clauses(ClauseOrigin::Original, checkpoint)?;
        if config.collect_learned_clauses {
            self.push_clauses(ClauseOrigin::Learned, checkpoint)?;
        }
        Ok(mc)
    }

    fn push_clauses(&mut self, origin: ClauseOrigin, checkpoint: &mut Checkpoint) -> Result<()> {
        let engine = self.engine;
        for clause in engine.clauses(origin) {
            checkpoint.check(self.memory_used())?;
            let args: Vec<TermId> = clause.iter().map(|&l| self.formula_of(l)).collect();
            let or = self.tm.mk_or(args);
            self.formulas.push(or);
        }
        Ok(())
    }

    fn formula_of(&self, lit: Lit) -> TermId {
        let (pos, neg) = self.lits[lit.var().index()];
        if lit.is_pos() { pos } else { neg }
    }

    fn memory_used(&self) -> u64 {
        let lits = self.lits.capacity() * std::mem::size_of::<(TermId, TermId)>();
        let formulas = self.formulas.capacity() * std::mem::size_of::<TermId>();
        self.engine.memory_usage() + (lits + formulas) as u64
    }
}

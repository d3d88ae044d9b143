//! Tseitin encoding of boolean skeletons.
//!
//! The encoder walks each formula with an explicit frame stack and a stack of
//! compiled child literals, so formula depth never turns into native stack
//! depth. Negations are absorbed into the polarity of the frame being built.
//! Compound nodes not at the root receive a fresh definition variable which
//! is cached for the rest of the call, so a shared sub-DAG is defined once.
//!
//! Root connectives are asserted directly without a definition variable:
//!
//! | node            | positive                 | negative                  |
//! |-----------------|--------------------------|---------------------------|
//! | `(or a..)`      | `(a1 .. an)`             | `(-a1)` .. `(-an)`        |
//! | `(= a b)`       | `(a -b) (-a b)`          | `(a b) (-a -b)`           |
//! | `(ite c t e)`   | `(-c t) (c e)`           | `(-c -t) (c -e)`          |

use crate::atom_map::AtomMap;
use crate::config::EncoderConfig;
use crate::interface::collect_boolean_interface;
use rustc_hash::{FxHashMap, FxHashSet};
use satbridge_core::{BridgeError, CancelHandle, Checkpoint, Result, TermId, TermKind, TermManager};
use satbridge_sat::{Lit, SatEngine};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// How the encoder sees a term.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Node<'a> {
    /// `true` or `false`
    Const(bool),
    /// Negation
    Not(TermId),
    /// Disjunction
    Or(&'a [TermId]),
    /// Equivalence, or equality over booleans
    Iff(TermId, TermId),
    /// If-then-else with boolean branches
    Ite(TermId, TermId, TermId),
    /// Boolean connective that must be rewritten away first
    Unsupported(&'static str),
    /// Anything else: constants, applications, theory atoms, quantifiers
    Atom,
}

impl Node<'_> {
    fn arity(&self) -> usize {
        match self {
            Node::Or(args) => args.len(),
            Node::Iff(..) => 2,
            Node::Ite(..) => 3,
            Node::Not(_) => 1,
            Node::Const(_) | Node::Unsupported(_) | Node::Atom => 0,
        }
    }

    fn arg(&self, idx: usize) -> Option<TermId> {
        match *self {
            Node::Or(args) => args.get(idx).copied(),
            Node::Iff(a, b) => [a, b].get(idx).copied(),
            Node::Ite(c, t, e) => [c, t, e].get(idx).copied(),
            Node::Not(a) if idx == 0 => Some(a),
            _ => None,
        }
    }
}

pub(crate) fn classify(tm: &TermManager, id: TermId) -> Node<'_> {
    let Some(term) = tm.get(id) else {
        return Node::Atom;
    };
    match &term.kind {
        TermKind::True => Node::Const(true),
        TermKind::False => Node::Const(false),
        TermKind::Not(a) => Node::Not(*a),
        TermKind::Or(args) => Node::Or(args.as_slice()),
        TermKind::Iff(a, b) => Node::Iff(*a, *b),
        TermKind::Eq(a, b) if tm.is_bool(*a) => Node::Iff(*a, *b),
        TermKind::Ite(c, t, e) if tm.is_bool(*t) => Node::Ite(*c, *t, *e),
        TermKind::And(_) => Node::Unsupported("and"),
        TermKind::Xor(..) => Node::Unsupported("xor"),
        TermKind::Implies(..) => Node::Unsupported("=>"),
        TermKind::Distinct(_) => Node::Unsupported("distinct"),
        _ => Node::Atom,
    }
}

/// Check whether a batch still contains a connective the encoder rejects
/// (`and`, `xor`, `=>`, `distinct`), anywhere outside quantifier bodies.
///
/// Arguments of theory atoms are searched. Quantifier bodies are not: a
/// quantifier is a single opaque atom to the encoder, so connectives under
/// it never reach the encoder and do not make the batch unsupported.
#[must_use]
pub fn has_unsupported_bool(tm: &TermManager, formulas: &[TermId]) -> bool {
    let mut visited: FxHashSet<TermId> = FxHashSet::default();
    let mut todo: Vec<TermId> = formulas.to_vec();
    while let Some(t) = todo.pop() {
        if !visited.insert(t) {
            continue;
        }
        if matches!(classify(tm, t), Node::Unsupported(_)) {
            return true;
        }
        let Some(term) = tm.get(t) else {
            continue;
        };
        if matches!(term.kind, TermKind::Forall { .. }) {
            continue;
        }
        todo.extend(term.kind.children().into_iter().filter(|c| !visited.contains(c)));
    }
    false
}

/// Counters for one encoder call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Atoms that received a new variable
    pub atoms: u64,
    /// Definition variables introduced for compound nodes
    pub fresh_vars: u64,
    /// Clauses sent to the engine
    pub clauses: u64,
    /// Compound nodes answered from the cache
    pub cache_hits: u64,
}

/// Tseitin encoder from formulas to engine clauses.
#[derive(Debug, Default)]
pub struct Encoder {
    cancel: CancelHandle,
}

impl Encoder {
    /// Create an encoder.
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

    /// Encode a batch of formulas into `engine`.
    ///
    /// Atoms already in `map` keep their variable; new atoms are added to it.
    /// On error the call stops at once. Clauses already emitted stay in the
    /// engine.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::UnsupportedOperator`] on `and`, `xor`, `=>` or `distinct`
    /// - [`BridgeError::ResourceExceeded`] when the memory cap is crossed
    /// - [`BridgeError::Cancelled`] when cancellation is observed
    pub fn encode<E: SatEngine + ?Sized>(
        &self,
        tm: &TermManager,
        formulas: &[TermId],
        config: &EncoderConfig,
        engine: &mut E,
        map: &mut AtomMap,
    ) -> Result<EncodeStats> {
        let call = self.cancel.activate();
        let mut checkpoint = call.checkpoint(config.max_memory_bytes());
        debug!(
            formulas = formulas.len(),
            vars = engine.num_vars(),
            "encoding formulas"
        );

        let mut run = EncodeRun {
            tm,
            engine,
            map,
            interface: collect_boolean_interface(tm, formulas),
            ite_extra: config.ite_extra_clauses,
            cache: FxHashMap::default(),
            frames: Vec::with_capacity(32),
            results: Vec::with_capacity(32),
            stats: EncodeStats::default(),
        };
        let outcome = formulas
            .iter()
            .try_for_each(|&f| run.encode_formula(f, &mut checkpoint));

        match outcome {
            Ok(()) => {
                debug!(
                    atoms = run.stats.atoms,
                    fresh_vars = run.stats.fresh_vars,
                    clauses = run.stats.clauses,
                    cache_hits = run.stats.cache_hits,
                    "encoding finished"
                );
                Ok(run.stats)
            }
            Err(err) => {
                if err.is_interrupt() {
                    warn!(error = %err, polls = checkpoint.polls(), "encoding aborted");
                }
                Err(err)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    term: TermId,
    root: bool,
    sign: bool,
    next: usize,
}

struct EncodeRun<'a, E: SatEngine + ?Sized> {
    tm: &'a TermManager,
    engine: &'a mut E,
    map: &'a mut AtomMap,
    interface: FxHashSet<TermId>,
    ite_extra: bool,
    cache: FxHashMap<TermId, Lit>,
    frames: Vec<Frame>,
    results: Vec<Lit>,
    stats: EncodeStats,
}

impl<E: SatEngine + ?Sized> EncodeRun<'_, E> {
    fn encode_formula(&mut self, formula: TermId, checkpoint: &mut Checkpoint) -> Result<()> {
        checkpoint.check(self.memory_used())?;
        if self.visit(formula, true, false)? {
            return Ok(());
        }
        let tm = self.tm;
        'frames: while let Some(&frame) = self.frames.last() {
            checkpoint.check(self.memory_used())?;
            let node = classify(tm, frame.term);
            let top = self.frames.len() - 1;
            let mut next = frame.next;
            while let Some(child) = node.arg(next) {
                next += 1;
                self.frames[top].next = next;
                if !self.visit(child, false, false)? {
                    continue 'frames;
                }
            }
            self.frames.pop();
            self.synthesize(&frame, &node);
        }
        self.results.clear();
        Ok(())
    }

    /// Visit a term. Returns `true` when its literal is ready (or asserted,
    /// at the root), `false` when a frame was pushed for it.
    fn visit(&mut self, term: TermId, root: bool, sign: bool) -> Result<bool> {
        let tm = self.tm;
        let (mut term, mut sign) = (term, sign);
        let mut node = classify(tm, term);
        while let Node::Not(arg) = node {
            term = arg;
            sign = !sign;
            node = classify(tm, term);
        }

        match node {
            Node::Const(value) => {
                let lit = self.true_lit();
                self.produce(if value { lit } else { !lit }, root, sign);
                Ok(true)
            }
            Node::Atom => {
                let lit = self.atom_lit(term);
                self.produce(lit, root, sign);
                Ok(true)
            }
            Node::Unsupported(op) => Err(BridgeError::UnsupportedOperator { op, term }),
            Node::Or(_) | Node::Iff(..) | Node::Ite(..) | Node::Not(_) => {
                if let Some(&lit) = self.cache.get(&term) {
                    self.stats.cache_hits += 1;
                    self.produce(lit, root, sign);
                    return Ok(true);
                }
                self.frames.push(Frame {
                    term,
                    root,
                    sign,
                    next: 0,
                });
                Ok(false)
            }
        }
    }

    /// Assert `lit` at the root, push it otherwise.
    fn produce(&mut self, lit: Lit, root: bool, sign: bool) {
        let lit = if sign { !lit } else { lit };
        if root {
            self.add_clause(&[lit]);
        } else {
            self.results.push(lit);
        }
    }

    fn atom_lit(&mut self, atom: TermId) -> Lit {
        if let Some(var) = self.map.get(atom) {
            return Lit::pos(var);
        }
        let external = !self.tm.is_uninterp_const(atom) || self.interface.contains(&atom);
        let var = self.engine.new_var(external);
        self.map.insert(atom, var);
        self.stats.atoms += 1;
        trace!(var = var.0, atom = atom.0, external, "atom variable");
        Lit::pos(var)
    }

    /// Literal of `true`, created and asserted on first use.
    fn true_lit(&mut self) -> Lit {
        let atom = self.tm.mk_true();
        if let Some(var) = self.map.get(atom) {
            return Lit::pos(var);
        }
        let var = self.engine.new_var(true);
        self.map.insert(atom, var);
        self.stats.atoms += 1;
        trace!(var = var.0, "true variable");
        self.add_clause(&[Lit::pos(var)]);
        Lit::pos(var)
    }

    fn fresh_lit(&mut self, term: TermId) -> Lit {
        let var = self.engine.new_var(false);
        self.stats.fresh_vars += 1;
        trace!(var = var.0, term = term.0, "definition variable");
        Lit::pos(var)
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        self.stats.clauses += 1;
        trace!(clause = ?lits, "clause");
        self.engine.add_clause(lits);
    }

    /// Build the definition of a frame whose children are all on the result
    /// stack, and assert it (root) or push its literal.
    fn synthesize(&mut self, frame: &Frame, node: &Node<'_>) {
        let arity = node.arity();
        let start = self.results.len().saturating_sub(arity);
        let args: SmallVec<[Lit; 8]> = self.results.drain(start..).collect();
        match (*node, frame.root) {
            (Node::Or(_), true) => self.root_or(&args, frame.sign),
            (Node::Or(_), false) => {
                let k = self.fresh_lit(frame.term);
                for &a in &args {
                    self.add_clause(&[!a, k]);
                }
                let mut long: SmallVec<[Lit; 8]> = SmallVec::with_capacity(args.len() + 1);
                long.push(!k);
                long.extend_from_slice(&args);
                self.add_clause(&long);
                self.define(frame, k);
            }
            (Node::Iff(..), true) => {
                let (l1, l2) = (args[0], args[1]);
                if frame.sign {
                    self.add_clause(&[l1, l2]);
                    self.add_clause(&[!l1, !l2]);
                } else {
                    self.add_clause(&[l1, !l2]);
                    self.add_clause(&[!l1, l2]);
                }
            }
            (Node::Iff(..), false) => {
                let (l1, l2) = (args[0], args[1]);
                let k = self.fresh_lit(frame.term);
                self.add_clause(&[!k, l1, !l2]);
                self.add_clause(&[!k, !l1, l2]);
                self.add_clause(&[k, l1, l2]);
                self.add_clause(&[k, !l1, !l2]);
                self.define(frame, k);
            }
            (Node::Ite(..), true) => {
                let (c, t, e) = (args[0], args[1], args[2]);
                if frame.sign {
                    self.add_clause(&[!c, !t]);
                    self.add_clause(&[c, !e]);
                } else {
                    self.add_clause(&[!c, t]);
                    self.add_clause(&[c, e]);
                }
            }
            (Node::Ite(..), false) => {
                let (c, t, e) = (args[0], args[1], args[2]);
                let k = self.fresh_lit(frame.term);
                self.add_clause(&[!k, !c, t]);
                self.add_clause(&[!k, c, e]);
                self.add_clause(&[k, !c, !t]);
                self.add_clause(&[k, c, !e]);
                if self.ite_extra {
                    self.add_clause(&[!t, !e, k]);
                    self.add_clause(&[t, e, !k]);
                }
                self.define(frame, k);
            }
            _ => {}
        }
    }

    fn root_or(&mut self, args: &[Lit], sign: bool) {
        if sign {
            debug!(children = args.len(), "negated disjunction at the root");
            for &a in args {
                self.add_clause(&[!a]);
            }
        } else {
            self.add_clause(args);
        }
    }

    fn define(&mut self, frame: &Frame, k: Lit) {
        self.cache.insert(frame.term, k);
        self.results.push(if frame.sign { !k } else { k });
    }

    fn memory_used(&self) -> u64 {
        let frames = self.frames.capacity() * std::mem::size_of::<Frame>();
        let results = self.results.capacity() * std::mem::size_of::<Lit>();
        let cache = self.cache.capacity() * std::mem::size_of::<(TermId, Lit)>();
        self.engine.memory_usage() + (frames + results + cache) as u64
    }
}

//! # Round Trip Example
//!
//! Encodes a small boolean skeleton into a clause store, lets variable
//! elimination simplify it, decodes the result and lifts a model of the
//! decoded formulas back to a model of the input.
//!
//! ## See Also
//! - [`Encoder`](satbridge_cnf::Encoder) for the Tseitin encoding
//! - [`Decoder`](satbridge_cnf::Decoder) for reading clauses back
//! - [`SatModelConverter`](satbridge_cnf::SatModelConverter) for model lifting

use satbridge_cnf::{AtomMap, Decoder, DecoderConfig, Encoder, EncoderConfig};
use satbridge_core::{Model, ModelEvaluator, TermId, TermManager};
use satbridge_sat::{ClauseStore, SatEngine, Var, VariableEliminator};

fn main() {
    println!("=== SatBridge CNF: Round Trip ===\n");

    let mut tm = TermManager::new();
    let p = tm.mk_var("p", tm.sorts.bool_sort);
    let q = tm.mk_var("q", tm.sorts.bool_sort);
    let r = tm.mk_var("r", tm.sorts.bool_sort);

    // (or p q), (iff r (ite p q (not q)))
    let not_q = tm.mk_not(q);
    let ite = tm.mk_ite(p, q, not_q);
    let formulas = vec![tm.mk_or([p, q]), tm.mk_iff(r, ite)];
    println!("Input:");
    for &f in &formulas {
        println!("  {}", tm.display(f));
    }

    // ===== Encoding =====
    let mut store = ClauseStore::new();
    let mut map = AtomMap::new();
    let stats = match Encoder::new().encode(
        &tm,
        &formulas,
        &EncoderConfig::default(),
        &mut store,
        &mut map,
    ) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("encoding failed: {err}");
            return;
        }
    };
    println!(
        "\nEncoded: {} atoms, {} fresh vars, {} clauses",
        stats.atoms, stats.fresh_vars, stats.clauses
    );

    // ===== Preprocessing =====
    let eliminated = VariableEliminator::default().eliminate(&mut store);
    println!("Eliminated {} variable(s): {:?}", eliminated.len(), eliminated);

    // ===== Decoding =====
    let config = DecoderConfig::default().with_model_converter(true);
    let decoded = match Decoder::new().decode(&mut tm, &store, &map, &config) {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("decoding failed: {err}");
            return;
        }
    };
    println!("\nDecoded:");
    for &f in &decoded.formulas {
        println!("  {}", tm.display(f));
    }
    let Some(mc) = decoded.model_converter else {
        return;
    };
    println!("\nModel converter:\n{}", mc.display(&tm));

    // ===== Model lifting =====
    // Free constants of the decoded formulas: surviving atoms and proxies
    let free: Vec<TermId> = mc
        .atoms()
        .iter()
        .enumerate()
        .filter(|&(v, &atom)| !store.is_eliminated(Var(v as u32)) && tm.is_uninterp_const(atom))
        .map(|(_, &atom)| atom)
        .collect();

    let Some(mut model) = first_model(&tm, &decoded.formulas, &free) else {
        println!("\nDecoded formulas are unsatisfiable");
        return;
    };
    mc.apply(&mut model, &tm);

    println!("\nLifted model:");
    for &atom in &[p, q, r] {
        println!("  {} = {:?}", tm.display(atom), model.get_bool(atom));
    }
    let mut eval = ModelEvaluator::new(&tm, &model);
    for &f in &formulas {
        println!("  {} -> {:?}", tm.display(f), eval.eval_bool(f));
    }
}

/// Enumerate assignments of `free` until every formula evaluates to true.
fn first_model(tm: &TermManager, formulas: &[TermId], free: &[TermId]) -> Option<Model> {
    (0u64..1 << free.len()).find_map(|bits| {
        let mut model = Model::new();
        for (i, &atom) in free.iter().enumerate() {
            model.assign_bool(atom, (bits >> i) & 1 == 1);
        }
        let mut eval = ModelEvaluator::new(tm, &model);
        formulas
            .iter()
            .all(|&f| eval.eval_bool(f) == Some(true))
            .then_some(model)
    })
}

//! Decoder and model converter properties

use super::encoding_properties::{consistent_under, truth};
use super::*;
use satbridge_cnf::*;
use satbridge_core::{Model, ModelEvaluator};
use satbridge_sat::{ClauseStore, Lit, SatEngine, Var, VariableEliminator};

fn encode(tm: &TermManager, f: TermId) -> (ClauseStore, AtomMap) {
    let mut store = ClauseStore::new();
    let mut map = AtomMap::new();
    Encoder::new()
        .encode(tm, &[f], &EncoderConfig::default(), &mut store, &mut map)
        .expect("encoding failed");
    (store, map)
}

proptest! {
    /// Decoded formulas accept the same atom assignments as the original
    #[test]
    fn decode_then_encode_preserves_models(s in shape()) {
        let mut tm = TermManager::new();
        let atoms = atoms(&mut tm);
        let f = build(&mut tm, &atoms, &s);
        let (store, map) = encode(&tm, f);

        let decoded = Decoder::new()
            .decode(&mut tm, &store, &map, &DecoderConfig::default())
            .expect("decoding failed");
        for values in assignments(NUM_ATOMS) {
            prop_assert_eq!(
                consistent_under(&tm, &decoded.formulas, &EncoderConfig::default(), &atoms, &values),
                truth(&tm, f, &atoms, &values)
            );
        }
    }

    /// A model of the simplified clauses converts to a model of the formula
    #[test]
    fn converted_models_satisfy_the_formula(s in shape()) {
        let mut tm = TermManager::new();
        let atoms = atoms(&mut tm);
        let f = build(&mut tm, &atoms, &s);
        let witness = assignments(NUM_ATOMS).find(|values| truth(&tm, f, &atoms, values));
        prop_assume!(witness.is_some());
        let witness = witness.unwrap_or_default();

        let (mut store, map) = encode(&tm, f);

        // full assignment induced by the witness
        let mut probe = store.clone();
        for (&atom, &value) in atoms.iter().zip(&witness) {
            if let Some(var) = map.get(atom) {
                probe.add_clause(&[if value { Lit::pos(var) } else { Lit::neg(var) }]);
            }
        }
        prop_assert!(!probe.is_inconsistent());
        let full = probe.assignment().to_vec();

        VariableEliminator::default().eliminate(&mut store);
        let decoded = Decoder::new()
            .decode(&mut tm, &store, &map, &DecoderConfig::default().with_model_converter(true))
            .expect("decoding failed");
        let mc = decoded.model_converter.expect("converter requested");

        let mut model = Model::new();
        for (v, &atom) in mc.atoms().iter().enumerate() {
            if store.is_eliminated(Var(v as u32)) || !tm.is_uninterp_const(atom) {
                continue;
            }
            if let Some(b) = full.get(v).and_then(|value| value.to_bool()) {
                model.assign_bool(atom, b);
            }
        }
        {
            let mut eval = ModelEvaluator::new(&tm, &model);
            for &g in &decoded.formulas {
                prop_assert_eq!(eval.eval_bool(g), Some(true), "{}", tm.display(g));
            }
        }

        mc.apply(&mut model, &tm);
        for &proxy in mc.proxies() {
            prop_assert!(!model.contains(proxy));
        }
        prop_assert_eq!(ModelEvaluator::new(&tm, &model).eval_bool(f), Some(true));
    }
}

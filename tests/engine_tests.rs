// tests/engine_tests.rs

use qsnap::{
    AmplitudeVector, Engine, EngineConfig, OutputSelectors, RegisterLayout, RegisterLayoutBuilder,
    ShotCapture, SnapshotError, SnapshotLabel, VectorEngine, VectorReport, reduce,
};
use num_complex::Complex64;
use serde_json::{Value, json};
use std::f64::consts::FRAC_1_SQRT_2;

const TEST_TOLERANCE: f64 = 1e-9;

fn label(n: u64) -> SnapshotLabel {
    SnapshotLabel(n)
}

fn plus_state() -> AmplitudeVector {
    AmplitudeVector::from_real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2])
}

fn one_qubit() -> RegisterLayout {
    RegisterLayoutBuilder::new().add_register("q", 1).build()
}

fn all_outputs() -> Vec<&'static str> {
    vec![
        "quantumstateket",
        "densitymatrix",
        "probabilities",
        "probabilitiesket",
        "targetstatesinner",
        "targetstatesprobs",
    ]
}

fn assert_close(actual: &Value, expected: f64, context: &str) {
    let value = actual.as_f64().unwrap_or_else(|| panic!("{} is not a number: {}", context, actual));
    assert!(
        (value - expected).abs() < TEST_TOLERANCE,
        "{}: actual {}, expected {}",
        context,
        value,
        expected
    );
}

fn assert_complex_close(actual: &Value, expected: Complex64, context: &str) {
    assert_close(&actual[0], expected.re, context);
    assert_close(&actual[1], expected.im, context);
}

#[test]
fn test_single_qubit_plus_state_end_to_end() -> Result<(), SnapshotError> {
    let config = json!({
        "data": all_outputs(),
        "chop": 1e-10,
        "target_states": [[FRAC_1_SQRT_2, FRAC_1_SQRT_2]],
    });
    let layout = one_qubit();
    let mut engine = VectorEngine::from_document(&config);

    for _ in 0..2 {
        let shot = ShotCapture::new(plus_state()).with_snapshot(label(0), plus_state());
        engine.compute(&layout, &shot)?;
    }

    let doc = engine.encode()?;
    println!("{}", serde_json::to_string_pretty(&doc)?);

    assert_eq!(doc["shots"], json!(2));

    let probs = &doc["probabilities"]["0"];
    assert_close(&probs[0], 0.5, "probabilities[0][0]");
    assert_close(&probs[1], 0.5, "probabilities[0][1]");

    let rho = &doc["density_matrix"]["0"];
    for i in 0..2 {
        for j in 0..2 {
            assert_complex_close(&rho[i][j], Complex64::new(0.5, 0.0), "density_matrix[0]");
        }
    }

    let kets = doc["quantum_state_ket"].as_array().expect("ket list");
    assert_eq!(kets.len(), 2);
    for ket in kets {
        let entry = &ket["0"];
        assert_eq!(entry.as_object().map(|o| o.len()), Some(2));
        assert_complex_close(&entry["0"], Complex64::new(FRAC_1_SQRT_2, 0.0), "ket |0>");
        assert_complex_close(&entry["1"], Complex64::new(FRAC_1_SQRT_2, 0.0), "ket |1>");
    }

    let probs_ket = &doc["probabilities_ket"]["0"];
    assert_close(&probs_ket["0"], 0.5, "probabilities_ket |0>");
    assert_close(&probs_ket["1"], 0.5, "probabilities_ket |1>");

    let inner = doc["inner_products"]["0"].as_array().expect("inner product list");
    assert_eq!(inner.len(), 2, "one inner-product entry per shot");
    for shot in inner {
        assert_complex_close(&shot[0], Complex64::new(1.0, 0.0), "inner product");
    }

    assert_close(&doc["overlaps"]["0"][0], 1.0, "overlaps[0]");
    Ok(())
}

#[test]
fn test_disabled_and_empty_categories_are_omitted() -> Result<(), SnapshotError> {
    let config = json!({ "data": ["probs", "targetstatesinner"] });
    let mut engine = VectorEngine::from_document(&config);
    let shot = ShotCapture::new(plus_state()).with_snapshot(label(4), plus_state());
    engine.compute(&one_qubit(), &shot)?;

    let doc = engine.encode()?;
    let obj = doc.as_object().expect("document object");
    assert!(obj.contains_key("probabilities"));
    // Enabled, but no target states were configured
    assert!(!obj.contains_key("inner_products"));
    for absent in ["quantum_state_ket", "density_matrix", "probabilities_ket", "overlaps", "counts"] {
        assert!(!obj.contains_key(absent), "{} should be omitted", absent);
    }
    Ok(())
}

#[test]
fn test_shot_without_snapshots_creates_no_entries() -> Result<(), SnapshotError> {
    let config = EngineConfig::new()
        .with_selectors(OutputSelectors::all())
        .with_target_states(vec![plus_state()], true);
    let mut engine = VectorEngine::new(config);
    engine.compute(&one_qubit(), &ShotCapture::new(plus_state()))?;

    assert_eq!(engine.total_shots(), 1);
    assert!(engine.accumulator().is_empty());
    assert!(engine.render().snapshots.is_empty());
    Ok(())
}

#[test]
fn test_size_mismatch_aborts_shot() -> Result<(), SnapshotError> {
    let config = EngineConfig::new()
        .with_selectors(OutputSelectors::all())
        .with_target_states(vec![AmplitudeVector::from_real(&[1.0, 0.0, 0.0, 0.0])], true);
    let mut engine = VectorEngine::new(config);
    let layout = one_qubit();

    let shot = ShotCapture::new(plus_state()).with_snapshot(label(0), plus_state());
    match engine.compute(&layout, &shot) {
        Err(SnapshotError::SizeMismatch { target_len, snapshot_len, .. }) => {
            assert_eq!(target_len, 4);
            assert_eq!(snapshot_len, 2);
        }
        other => panic!("expected SizeMismatch, got {:?}", other),
    }

    assert_eq!(engine.total_shots(), 0, "failed shot must not be counted");
    assert!(engine.accumulator().inner_products().is_empty());
    assert!(engine.accumulator().overlaps().is_empty());
    Ok(())
}

#[test]
fn test_size_mismatch_message_names_both_lengths() {
    let err = SnapshotError::SizeMismatch {
        target_len: 8,
        snapshot_len: 4,
        target_index: 0,
        label: label(2),
    };
    let msg = err.to_string();
    assert!(msg.contains('8') && msg.contains('4'), "message was: {}", msg);
    assert_eq!(err.mismatched_lengths(), Some((8, 4)));
}

#[test]
fn test_render_is_repeatable() -> Result<(), SnapshotError> {
    let config = EngineConfig::new()
        .with_selectors(OutputSelectors::all())
        .with_target_states(vec![AmplitudeVector::from_real(&[1.0, 0.0])], true);
    let mut engine = VectorEngine::new(config);
    let layout = one_qubit();
    for state in [plus_state(), AmplitudeVector::from_real(&[0.6, 0.8])] {
        let shot = ShotCapture::new(state.clone()).with_snapshot(label(1), state);
        engine.compute(&layout, &shot)?;
    }

    let before = engine.clone();
    let first = engine.render();
    let second = engine.render();
    assert_eq!(first, second);
    assert_eq!(engine, before, "rendering must not mutate the engine");
    Ok(())
}

#[test]
fn test_noise_below_threshold_is_chopped() -> Result<(), SnapshotError> {
    let noisy = AmplitudeVector::new(vec![
        Complex64::new(1.0, 1e-9),
        Complex64::new(1e-7, 0.0),
    ]);
    let config = EngineConfig::new()
        .with_chop(1e-6)
        .with_selectors(OutputSelectors { probabilities: true, density: true, ..Default::default() });
    let mut engine = VectorEngine::new(config);
    engine.compute(&one_qubit(), &ShotCapture::new(noisy.clone()).with_snapshot(label(0), noisy))?;

    let report = engine.render().snapshots;
    let probs = &report.probabilities.expect("probabilities")[&label(0)];
    assert_eq!(probs[1], 0.0);
    assert!((probs[0] - 1.0).abs() < TEST_TOLERANCE);

    let rho = &report.density_matrix.expect("density")[&label(0)];
    // |ψ0 ψ1*| ~ 1e-7 < 1e-6
    assert_eq!(rho[0][1], Complex64::new(0.0, 0.0));
    assert_eq!(rho[1][1], Complex64::new(0.0, 0.0));
    assert_eq!(rho[0][0].im, 0.0);
    Ok(())
}

#[test]
fn test_ket_labels_follow_reversed_register_order() -> Result<(), SnapshotError> {
    // Registers a[1], b[2]: index 6 = 0b110 renders as "11 0"
    let layout = RegisterLayoutBuilder::new().add_register("a", 1).add_register("b", 2).build();
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); 8];
    amplitudes[6] = Complex64::new(1.0, 0.0);
    let state = AmplitudeVector::new(amplitudes);

    let config = EngineConfig::new().with_selectors(OutputSelectors { ket: true, ..Default::default() });
    let mut engine = VectorEngine::new(config);
    engine.compute(&layout, &ShotCapture::new(state.clone()).with_snapshot(label(0), state))?;

    let kets = engine.render().snapshots.quantum_state_ket.expect("kets");
    let keys: Vec<&String> = kets[0][&label(0)].keys().collect();
    assert_eq!(keys, vec!["11 0"]);
    Ok(())
}

#[test]
fn test_qutrit_ket_labels() -> Result<(), SnapshotError> {
    let layout = RegisterLayoutBuilder::new().add_register("t", 2).build();
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); 9];
    amplitudes[5] = Complex64::new(0.0, 1.0);
    let state = AmplitudeVector::new(amplitudes);

    let config = EngineConfig::from_document(&json!({ "data": ["probsket"], "qudit_dim": 3 }));
    let mut engine = VectorEngine::new(config);
    engine.compute(&layout, &ShotCapture::new(state.clone()).with_snapshot(label(0), state))?;

    let probs = engine.render().snapshots.probabilities_ket.expect("probabilities_ket");
    assert_eq!(probs[&label(0)].get("12"), Some(&1.0));
    Ok(())
}

#[test]
fn test_counts_merge_across_workers() -> Result<(), SnapshotError> {
    let config = EngineConfig::new();
    let layout = one_qubit();
    let workers: Vec<VectorEngine> = ["0", "1", "1"]
        .iter()
        .map(|outcome| {
            let mut engine = VectorEngine::new(config.clone());
            let shot = ShotCapture::new(plus_state()).with_outcome(*outcome);
            engine.compute(&layout, &shot).map(|_| engine)
        })
        .collect::<Result<_, _>>()?;

    let total = reduce(workers).expect("three workers");
    let doc = total.encode()?;
    assert_eq!(doc["shots"], json!(3));
    assert_eq!(doc["counts"], json!({ "0": 1, "1": 2 }));
    Ok(())
}

#[test]
fn test_reduce_of_nothing_is_none() {
    assert!(reduce(Vec::<VectorEngine>::new()).is_none());
}

#[test]
fn test_size_mismatch_on_second_label_commits_nothing() {
    let target = AmplitudeVector::from_real(&[1.0, 0.0, 0.0, 0.0]);
    let config = EngineConfig::new()
        .with_selectors(OutputSelectors::all())
        .with_target_states(vec![target.clone()], true);
    let mut engine = VectorEngine::new(config);
    let layout = RegisterLayoutBuilder::new().add_register("q", 2).build();

    // Label 0 matches the target, label 1 does not
    let shot = ShotCapture::new(target.clone())
        .with_snapshot(label(0), target)
        .with_snapshot(label(1), plus_state());
    match engine.compute(&layout, &shot) {
        Err(SnapshotError::SizeMismatch { label: failed, .. }) => assert_eq!(failed, label(1)),
        other => panic!("expected SizeMismatch, got {:?}", other),
    }

    let acc = engine.accumulator();
    assert!(acc.kets().is_empty());
    for l in [label(0), label(1)] {
        assert!(acc.density().get(l).is_none(), "density for {}", l);
        assert!(acc.probabilities().get(l).is_none(), "probabilities for {}", l);
        assert!(acc.probabilities_ket().get(l).is_none(), "probabilities_ket for {}", l);
        assert!(acc.inner_products().get(l).is_none(), "inner_products for {}", l);
        assert!(acc.overlaps().get(l).is_none(), "overlaps for {}", l);
    }
    assert_eq!(engine.total_shots(), 0);
}

#[test]
fn test_report_reads_back_from_json() -> Result<(), SnapshotError> {
    let config = EngineConfig::new()
        .with_selectors(OutputSelectors::all())
        .with_target_states(vec![AmplitudeVector::from_real(&[1.0, 0.0])], true);
    let mut engine = VectorEngine::new(config);
    let layout = one_qubit();

    // Basis states keep every rendered value exact in decimal
    let zero = AmplitudeVector::from_real(&[1.0, 0.0]);
    let one = AmplitudeVector::from_real(&[0.0, 1.0]);
    let first = ShotCapture::new(zero.clone())
        .with_snapshot(label(0), zero.clone())
        .with_snapshot(label(12), one.clone())
        .with_outcome("0");
    let second = ShotCapture::new(one.clone())
        .with_snapshot(label(0), one)
        .with_snapshot(label(12), zero)
        .with_outcome("1");
    engine.compute(&layout, &first)?;
    engine.compute(&layout, &second)?;

    let report = engine.render();
    let text = serde_json::to_string(&report)?;
    let decoded: VectorReport = serde_json::from_str(&text)?;

    assert_eq!(decoded, report);
    assert_eq!(decoded.base.shots, 2);
    assert_eq!(decoded.snapshots.overlaps.as_ref().map(|o| o.len()), Some(2));
    Ok(())
}

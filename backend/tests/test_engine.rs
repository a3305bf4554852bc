//! Engine Tests
//!
//! Critical invariants tested:
//! - Construction rejects K < 2, non-positive dt, degenerate initial shares
//! - Simplex: shares sum to 1 after every step
//! - Clamp: alignment in [0, 1], bandwidth in [0.01, 5.0] after every step
//! - Darwinian mode never changes alignment or bandwidth
//! - Degenerate normaliser raises NumericDegeneracy and leaves state untouched

use genesis_simulator_core_rs::core::numeric::sigmoid;
use genesis_simulator_core_rs::models::TransitionDirection;
use genesis_simulator_core_rs::{
    DynamicsMode, Engine, Event, SimulationConfig, SimulationError, SpeciesConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn reference_engine(mode: DynamicsMode) -> Engine {
    Engine::new(&SimulationConfig::default(), mode).expect("reference config is valid")
}

/// Config whose selection weights all underflow to exactly zero
///
/// Friction weight 1000 drives every core fitness to about -300; with
/// selection pressure 10 the exponent is about -3000.
fn underflow_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.fitness.friction = 1000.0;
    config.selection_pressure = 10.0;
    config
}

fn assert_invalid(config: &SimulationConfig, needle: &str) {
    match Engine::new(config, DynamicsMode::EndogenousAlignment) {
        Err(SimulationError::InvalidParameter(msg)) => assert!(
            msg.contains(needle),
            "message '{}' does not mention '{}'",
            msg,
            needle
        ),
        Err(other) => panic!("expected InvalidParameter, got {:?}", other),
        Ok(_) => panic!("expected InvalidParameter, engine was built"),
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_reference_initial_state() {
    let engine = reference_engine(DynamicsMode::EndogenousAlignment);
    let state = engine.state();

    assert_eq!(state.num_species(), 3);
    assert_eq!(state.shares(), &[1.0 / 3.0; 3]);
    assert_eq!(state.alignment(), &[0.1, 0.2, 0.15]);
    assert_eq!(state.bandwidth(), &[0.1, 0.1, 0.1]);
    assert_eq!(state.meaning(), &[0.5, 1.0, 1.5]);
    assert_eq!(state.friction(), &[0.8, 0.5, 0.3]);
    assert_eq!(engine.current_step(), 0);
    assert_eq!(engine.mode(), DynamicsMode::EndogenousAlignment);
    assert!(engine.event_log().is_empty());
}

#[test]
fn test_single_species_rejected() {
    let config = SimulationConfig {
        species: vec![SpeciesConfig::new("alone", 0.1, 0.1, 1.0, 0.5)],
        ..Default::default()
    };
    assert_invalid(&config, "at least 2 species");
}

#[test]
fn test_non_positive_dt_rejected() {
    for dt in [0.0, -0.05, f64::NAN, f64::INFINITY] {
        let config = SimulationConfig {
            dt,
            ..Default::default()
        };
        assert_invalid(&config, "dt");
    }
}

#[test]
fn test_zero_initial_shares_rejected() {
    let config = SimulationConfig {
        initial_shares: Some(vec![0.0, 0.0, 0.0]),
        ..Default::default()
    };
    assert_invalid(&config, "positive");
}

#[test]
fn test_negative_initial_share_rejected() {
    let config = SimulationConfig {
        initial_shares: Some(vec![0.7, -0.2, 0.5]),
        ..Default::default()
    };
    assert_invalid(&config, "non-negative");
}

#[test]
fn test_initial_shares_length_mismatch_rejected() {
    let config = SimulationConfig {
        initial_shares: Some(vec![0.5, 0.5]),
        ..Default::default()
    };
    assert_invalid(&config, "initial_shares");
}

#[test]
fn test_mutation_rate_above_one_rejected() {
    let config = SimulationConfig {
        mutation_rate: 1.01,
        ..Default::default()
    };
    assert_invalid(&config, "mutation_rate");
}

#[test]
fn test_inverted_bounds_rejected() {
    let mut config = SimulationConfig::default();
    config.bounds.bandwidth_min = 6.0;
    assert_invalid(&config, "bandwidth bounds");
}

#[test]
fn test_unnormalized_initial_shares_are_normalized() {
    let config = SimulationConfig {
        initial_shares: Some(vec![1.0, 1.0, 2.0]),
        ..Default::default()
    };
    let engine = Engine::new(&config, DynamicsMode::Darwinian).unwrap();
    assert_eq!(engine.state().shares(), &[0.25, 0.25, 0.5]);
}

// ============================================================================
// Single Step
// ============================================================================

#[test]
fn test_first_step_matches_hand_computation() {
    let config = SimulationConfig::default();
    let mut engine = Engine::new(&config, DynamicsMode::Darwinian).unwrap();
    let summary = engine.advance().unwrap();

    let r = [0.1, 0.2, 0.15];
    let b = [0.1, 0.1, 0.1];
    let m = [0.5, 1.0, 1.5];
    let c = [0.8, 0.5, 0.3];

    let mut weighted = [0.0; 3];
    let mut signals = [0.0; 3];
    for i in 0..3 {
        let core = 1.0 * r[i] + 1.5 * b[i] + 0.5 * m[i] - 0.8 * c[i];
        let s = sigmoid(5.0 * (r[i] + b[i] - 0.5 * c[i] - 1.0));
        let gain = 1.0 * (1.0 - s) + 3.0 * s;
        weighted[i] = (1.0 / 3.0) * (2.0 * core * gain).exp();
        signals[i] = s;
    }

    let mut growth = [0.0; 3];
    for j in 0..3 {
        for i in 0..3 {
            let q = if i == j { 0.99 } else { 0.005 };
            growth[j] += weighted[i] * q;
        }
    }
    let phi_bar: f64 = growth.iter().sum();

    for j in 0..3 {
        assert!((summary.shares[j] - growth[j] / phi_bar).abs() < 1e-12);
    }
    assert!((summary.mean_fitness - phi_bar).abs() < 1e-12);
    assert!((summary.mean_criticality - signals.iter().sum::<f64>() / 3.0).abs() < 1e-12);
    assert!((summary.mean_alignment - 0.15).abs() < 1e-12);
    assert!((summary.mean_bandwidth - 0.1).abs() < 1e-12);
}

#[test]
fn test_fittest_species_gains_share() {
    let mut engine = reference_engine(DynamicsMode::Darwinian);
    let summary = engine.advance().unwrap();

    // Species 2 has the highest meaning and lowest friction
    assert!(summary.shares[2] > 1.0 / 3.0);
    assert!(summary.shares[0] < 1.0 / 3.0);
}

// ============================================================================
// Invariants Over Many Steps
// ============================================================================

#[test]
fn test_simplex_preserved_every_step() {
    for mode in DynamicsMode::ALL {
        let mut engine = reference_engine(mode);
        for _ in 0..1000 {
            let summary = engine.advance().unwrap();
            let total: f64 = summary.shares.iter().sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "{} step {}: shares sum to {}",
                mode,
                summary.step,
                total
            );
            assert!(summary.shares.iter().all(|x| *x >= 0.0 && x.is_finite()));
        }
    }
}

#[test]
fn test_traits_stay_within_bounds_every_step() {
    let mut engine = reference_engine(DynamicsMode::EndogenousAlignment);
    for _ in 0..1000 {
        engine.advance().unwrap();
        let state = engine.state();
        assert!(state.alignment().iter().all(|r| (0.0..=1.0).contains(r)));
        assert!(state.bandwidth().iter().all(|b| (0.01..=5.0).contains(b)));
    }
}

#[test]
fn test_darwinian_traits_never_change() {
    let mut engine = reference_engine(DynamicsMode::Darwinian);
    for _ in 0..500 {
        engine.advance().unwrap();
    }
    assert_eq!(engine.state().alignment(), &[0.1, 0.2, 0.15]);
    assert_eq!(engine.state().bandwidth(), &[0.1, 0.1, 0.1]);
}

#[test]
fn test_environment_constants_never_change() {
    let mut engine = reference_engine(DynamicsMode::EndogenousAlignment);
    for _ in 0..300 {
        engine.advance().unwrap();
    }
    assert_eq!(engine.state().meaning(), &[0.5, 1.0, 1.5]);
    assert_eq!(engine.state().friction(), &[0.8, 0.5, 0.3]);
}

#[test]
fn test_criticality_signal_within_unit_interval() {
    let mut engine = reference_engine(DynamicsMode::EndogenousAlignment);
    for _ in 0..1000 {
        let summary = engine.advance().unwrap();
        assert!((0.0..=1.0).contains(&summary.mean_criticality));
    }
}

// ============================================================================
// Degeneracy Guard
// ============================================================================

#[test]
fn test_underflowing_selection_raises_numeric_degeneracy() {
    let mut engine = Engine::new(&underflow_config(), DynamicsMode::EndogenousAlignment).unwrap();

    match engine.advance() {
        Err(SimulationError::NumericDegeneracy { step, phi_bar }) => {
            assert_eq!(step, 1);
            assert_eq!(phi_bar, 0.0);
        }
        other => panic!("expected NumericDegeneracy, got {:?}", other),
    }
}

#[test]
fn test_degenerate_step_leaves_state_untouched() {
    let mut engine = Engine::new(&underflow_config(), DynamicsMode::EndogenousAlignment).unwrap();
    let before = engine.state().clone();

    assert!(engine.advance().is_err());

    assert_eq!(engine.state(), &before);
    assert_eq!(engine.current_step(), 0);
    assert!(engine.state().shares().iter().all(|x| !x.is_nan()));
}

#[test]
fn test_overflowing_selection_raises_numeric_degeneracy() {
    let mut config = SimulationConfig::default();
    config.fitness.meaning = 1000.0;
    config.selection_pressure = 10.0;

    let mut engine = Engine::new(&config, DynamicsMode::Darwinian).unwrap();
    match engine.advance() {
        Err(SimulationError::NumericDegeneracy { phi_bar, .. }) => {
            assert!(!phi_bar.is_finite())
        }
        other => panic!("expected NumericDegeneracy, got {:?}", other),
    }
}

#[test]
fn test_degeneracy_error_message() {
    let err = SimulationError::NumericDegeneracy {
        step: 12,
        phi_bar: 0.0,
    };
    assert_eq!(err.to_string(), "Numeric degeneracy at step 12: phi_bar = 0");
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_dominance_shift_logged_on_first_step() {
    let mut engine = reference_engine(DynamicsMode::Darwinian);
    engine.advance().unwrap();

    // Uniform start reports species 0 as dominant; species 2 takes over at once
    let shifts = engine.event_log().events_of_type("DominanceShift");
    assert_eq!(shifts.len(), 1);
    assert_eq!(
        shifts[0],
        &Event::DominanceShift {
            step: 1,
            from: 0,
            to: 2,
            share: engine.state().shares()[2],
        }
    );
}

#[test]
fn test_endogenous_run_logs_awakening() {
    let mut engine = reference_engine(DynamicsMode::EndogenousAlignment);
    for _ in 0..1000 {
        engine.advance().unwrap();
    }

    let log = engine.event_log();
    let awakening = log.first_awakening(2).expect("species 2 should awaken");
    assert!(awakening > 1);

    let first = log
        .events_for_species(2)
        .into_iter()
        .find(|e| e.event_type() == "PhaseTransition")
        .unwrap();
    match first {
        Event::PhaseTransition {
            signal, direction, ..
        } => {
            assert_eq!(*direction, TransitionDirection::Awakening);
            assert!(*signal >= 0.5);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_darwinian_run_never_transitions() {
    let mut engine = reference_engine(DynamicsMode::Darwinian);
    for _ in 0..1000 {
        engine.advance().unwrap();
    }
    assert!(engine.event_log().events_of_type("PhaseTransition").is_empty());
    assert!(engine.event_log().events_of_type("TraitClamped").is_empty());
}

#[test]
fn test_bandwidth_ceiling_logged_once_per_species() {
    let mut engine = reference_engine(DynamicsMode::EndogenousAlignment);
    for _ in 0..1000 {
        engine.advance().unwrap();
    }

    for species in 0..3 {
        let ceiling_hits = engine
            .event_log()
            .events_for_species(species)
            .into_iter()
            .filter(|e| matches!(e, Event::TraitClamped { clamped, .. } if *clamped == 5.0))
            .count();
        assert!(ceiling_hits <= 1, "species {} logged {} ceiling hits", species, ceiling_hits);
    }
}

//! Property-Based Invariant Tests
//!
//! Random species sets and parameters, checked against the invariants that
//! must hold for every step of every run:
//! - shares stay on the simplex
//! - traits stay within their bounds
//! - Darwinian traits never move
//! - the mutation matrix is row-stochastic
//! - the criticality signal is monotone in the threshold

use genesis_simulator_core_rs::{
    CriticalityParams, DynamicsMode, Engine, MutationMatrix, SimulationConfig, SpeciesConfig,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn species_strategy() -> impl Strategy<Value = SpeciesConfig> {
    (0.0..1.0f64, 0.01..5.0f64, 0.0..3.0f64, 0.0..2.0f64).prop_map(|(r, b, m, c)| {
        SpeciesConfig::new("s", r, b, m, c)
    })
}

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (
        prop::collection::vec(species_strategy(), 2..6),
        0.001..0.2f64,
        0.0..0.2f64,
        0.0..3.0f64,
        0.0..2.0f64,
    )
        .prop_map(|(species, dt, mutation_rate, selection_pressure, phi)| {
            let species = species
                .into_iter()
                .enumerate()
                .map(|(i, s)| SpeciesConfig {
                    label: format!("species_{}", i),
                    ..s
                })
                .collect();
            SimulationConfig {
                dt,
                steps: 200,
                phi,
                mutation_rate,
                selection_pressure,
                species,
                ..Default::default()
            }
        })
}

fn mode_strategy() -> impl Strategy<Value = DynamicsMode> {
    prop_oneof![
        Just(DynamicsMode::Darwinian),
        Just(DynamicsMode::EndogenousAlignment)
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_stay_on_simplex(config in config_strategy(), mode in mode_strategy()) {
        let mut engine = Engine::new(&config, mode).unwrap();

        for _ in 0..config.steps {
            let summary = engine.advance().unwrap();
            let sum: f64 = summary.shares.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "share sum {}", sum);
            prop_assert!(summary.shares.iter().all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn prop_traits_stay_within_bounds(config in config_strategy()) {
        let mut engine = Engine::new(&config, DynamicsMode::EndogenousAlignment).unwrap();
        let bounds = config.bounds;

        for _ in 0..config.steps {
            engine.advance().unwrap();
            let state = engine.state();
            prop_assert!(state.alignment().iter().all(|&r| bounds.contains_alignment(r)));
            prop_assert!(state.bandwidth().iter().all(|&b| bounds.contains_bandwidth(b)));
        }
    }

    #[test]
    fn prop_darwinian_traits_constant(config in config_strategy()) {
        let mut engine = Engine::new(&config, DynamicsMode::Darwinian).unwrap();
        let alignment = engine.state().alignment().to_vec();
        let bandwidth = engine.state().bandwidth().to_vec();

        for _ in 0..config.steps {
            engine.advance().unwrap();
        }

        prop_assert_eq!(engine.state().alignment(), alignment.as_slice());
        prop_assert_eq!(engine.state().bandwidth(), bandwidth.as_slice());
    }

    #[test]
    fn prop_mutation_matrix_row_stochastic(k in 2usize..12, mu in 0.0..=1.0f64) {
        let q = MutationMatrix::uniform(k, mu).unwrap();

        prop_assert!(q.is_row_stochastic(1e-12));
        for i in 0..k {
            prop_assert!(q.row(i).iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn prop_signal_monotone_in_threshold(
        kappa in 0.0..50.0f64,
        tau_c in -5.0..5.0f64,
        a in -20.0..20.0f64,
        delta in 0.0..10.0f64,
    ) {
        let params = CriticalityParams { kappa, tau_c, ..Default::default() };
        let lo = params.signal(a);
        let hi = params.signal(a + delta);

        prop_assert!(hi >= lo);
        prop_assert!((0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi));
    }
}

//! History Export Tests
//!
//! CSV rows are flat numeric series aligned with the time axis; JSON carries
//! the full history including provenance and events.

use genesis_simulator_core_rs::{run_scenario, DynamicsMode, History, SimulationConfig};

fn run(steps: usize, mode: DynamicsMode) -> History {
    let config = SimulationConfig {
        steps,
        ..Default::default()
    };
    run_scenario(&config, mode).unwrap()
}

fn csv_of(history: &History) -> String {
    let mut buf = Vec::new();
    history.write_csv(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_csv_shape() {
    let history = run(40, DynamicsMode::EndogenousAlignment);
    let csv = csv_of(&history);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 41);
    assert_eq!(
        lines[0],
        "step,time,mean_alignment,mean_bandwidth,mean_criticality,mean_fitness,\
         share_species_0,share_species_1,share_species_2"
    );
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 9);
    }
}

#[test]
fn test_csv_values_parse_back() {
    let history = run(15, DynamicsMode::EndogenousAlignment);
    let csv = csv_of(&history);

    for (i, line) in csv.lines().skip(1).enumerate() {
        let fields: Vec<f64> = line.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields[0], (i + 1) as f64);
        assert_eq!(fields[1], history.time_axis()[i]);
        assert_eq!(fields[2], history.mean_alignment()[i]);
        assert_eq!(fields[3], history.mean_bandwidth()[i]);
        assert_eq!(fields[4], history.mean_criticality()[i]);
        assert_eq!(&fields[6..], history.shares()[i].as_slice());
    }
}

#[test]
fn test_empty_history_csv_has_header_only() {
    let history = run(0, DynamicsMode::Darwinian);
    assert_eq!(csv_of(&history).lines().count(), 1);
}

#[test]
fn test_json_export_round_trips() {
    let history = run(200, DynamicsMode::EndogenousAlignment);
    let json = history.to_json().unwrap();

    assert!(json.contains(history.config_hash()));
    assert!(json.contains("\"mode\":\"endogenous_alignment\""));

    let restored: History = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), history.len());
    assert_eq!(restored.mode(), history.mode());
    assert_eq!(restored.config_hash(), history.config_hash());
    assert_eq!(restored.species_labels(), history.species_labels());
    assert_eq!(restored.events().len(), history.events().len());

    let close = |a: &[f64], b: &[f64]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12);
    assert!(close(restored.mean_bandwidth(), history.mean_bandwidth()));
    assert!(close(restored.mean_alignment(), history.mean_alignment()));
    for (a, b) in restored.shares().iter().zip(history.shares()) {
        assert!(close(a, b));
    }
}

#[test]
fn test_species_share_series() {
    let history = run(100, DynamicsMode::Darwinian);
    let dominant = history.species_shares(2);

    assert_eq!(dominant.len(), 100);
    assert!(dominant.windows(2).all(|w| w[1] >= w[0]));
}

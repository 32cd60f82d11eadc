use dissipation_core::comparison::Comparison;
use dissipation_core::config::{AppConfig, EngineConfig, SweepConfig};
use dissipation_core::metrics::Metrics;
use dissipation_core::master;
use dissipation_data::Mode;
use dissipation_io::{export, persistence, RunMetadata};
use dissipation_lib::runner;
use std::fs::File;
use std::io::BufReader;
use tempfile::tempdir;

fn small_config() -> AppConfig {
    AppConfig {
        engine: EngineConfig {
            grid_size: 14,
            initial_agents: 10,
            initial_spread: 3.0,
            ..Default::default()
        },
        sweep: SweepConfig {
            total_ticks: 5,
            burn_in_ticks: 2,
            measure_ticks: 3,
            ..Default::default()
        },
    }
}

#[test]
fn test_checkpoint_resumes_identical_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("master.rkyv");
    let config = small_config();

    let state = master::generate_from_config(&config.engine);
    persistence::save_master_state(&state, &path).unwrap();
    let loaded = persistence::load_master_state(&path).unwrap();
    assert_eq!(loaded, state);

    let mut fresh = Comparison::new(config.engine.clone());
    let mut restored = Comparison::from_master(config.engine.clone(), loaded);
    for _ in 0..50 {
        assert_eq!(fresh.advance(), restored.advance());
    }
    assert_eq!(
        fresh.snapshot(Mode::Life).agents,
        restored.snapshot(Mode::Life).agents
    );
}

#[test]
fn test_run_export_file_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.csv");
    let config = small_config();

    let mut cmp = Comparison::new(config.engine.clone());
    let records = runner::run_comparison(&mut cmp, 20, &Metrics::new());
    let meta = RunMetadata::new(&config);
    export::write_comparison_file(&path, &meta, &records).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[1], export::comparison_header());
    assert!(lines[21].starts_with("20,"));

    let parsed = RunMetadata::read_from(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(parsed.engine, config.engine);
    assert_eq!(parsed.sweep, config.sweep);
    assert_eq!(parsed.fingerprint, config.fingerprint());
}

#[test]
fn test_sweep_export_and_archive() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("sweep.csv");
    let archive = dir.path().join("sweep.json.gz");
    let config = small_config();

    let outcome = runner::run_sweep(&config, None, &Metrics::new());
    assert_eq!(outcome.results.len(), 25);

    export::write_sweep_file(&csv, &RunMetadata::new(&config), &outcome.results).unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(text.lines().count(), 27);
    assert_eq!(text.lines().nth(1), Some(export::SWEEP_HEADER));

    persistence::save_results(&outcome.results, &archive).unwrap();
    let loaded = persistence::load_results(&archive).unwrap();
    assert_eq!(loaded.len(), outcome.results.len());
    for (a, b) in loaded.iter().zip(&outcome.results) {
        assert_eq!(a.inflow, b.inflow);
        assert_eq!(a.consumption, b.consumption);
        assert_eq!(a.status, b.status);
    }
}

#[test]
fn test_missing_checkpoint_is_error() {
    let dir = tempdir().unwrap();
    let result = persistence::load_master_state(dir.path().join("absent.rkyv"));
    assert!(result.is_err());
}

//! Output files written by a full run.

use policy_core::config::SimulationConfig;
use policy_core::runner::{run_simulation, METRICS_CSV, METRICS_JSON, RUN_SUMMARY};
use policy_events::{MetricsRecord, ModelSnapshot, RunSummary};
use std::fs;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.model.num_agents = 40;
    config.model.marginalized_fraction = 0.3;
    config.model.rel_policy_expansion = 0.05;
    config.model.seed = Some(11);
    config.run.steps = 12;
    config.run.snapshot_interval = 5;
    config.run.output_dir = dir.to_string_lossy().into_owned();
    config
}

#[test]
fn test_run_writes_all_outputs() {
    let dir = tempdir().unwrap();
    let summary = run_simulation(&config_in(dir.path())).unwrap();

    assert_eq!(summary.steps, 12);
    assert_eq!(summary.seed, 11);
    assert_eq!(summary.num_agents, 40);
    // start, steps 5 and 10, end
    assert_eq!(summary.snapshot_count, 4);
    assert!(summary.final_edge_count >= summary.initial_edge_count);

    let csv = fs::read_to_string(dir.path().join(METRICS_CSV)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], MetricsRecord::csv_header());

    let json = fs::read_to_string(dir.path().join(METRICS_JSON)).unwrap();
    let records: Vec<MetricsRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(Some(records[11]), summary.final_metrics);

    for name in ["step_000000.json", "step_000005.json", "step_000010.json"] {
        assert!(dir.path().join("snapshots").join(name).exists(), "missing {}", name);
    }

    let final_state = fs::read_to_string(dir.path().join("final_state.json")).unwrap();
    let snapshot = ModelSnapshot::from_json(&final_state).unwrap();
    assert_eq!(snapshot.step, 12);
    assert_eq!(snapshot.agents.len(), 40);
    assert_eq!(snapshot.edge_count, summary.final_edge_count);
    assert_eq!(snapshot.degree_histogram.values().sum::<usize>(), 40);
    let degree_total: usize = snapshot.degree_histogram.iter().map(|(d, n)| d * n).sum();
    assert_eq!(degree_total, 2 * snapshot.edge_count);

    let current = fs::read_to_string(dir.path().join("current_state.json")).unwrap();
    assert_eq!(ModelSnapshot::from_json(&current).unwrap().step, 12);

    let written: RunSummary =
        serde_json::from_str(&fs::read_to_string(dir.path().join(RUN_SUMMARY)).unwrap()).unwrap();
    assert_eq!(written.run_id, summary.run_id);
}

#[test]
fn test_invalid_config_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let mut config = config_in(&out);
    config.model.trigger_level = -1.0;

    assert!(run_simulation(&config).is_err());
    assert!(!out.exists());
}

#[test]
fn test_config_file_drives_run() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("run");
    let path = dir.path().join("policy.toml");
    fs::write(
        &path,
        format!(
            "[model]\nnum_agents = 25\nseed = 4\n\n[run]\nsteps = 3\nsnapshot_interval = 0\noutput_dir = {:?}\n",
            out.to_string_lossy()
        ),
    )
    .unwrap();

    let config = SimulationConfig::from_file(&path).unwrap();
    let summary = run_simulation(&config).unwrap();

    assert_eq!(summary.num_agents, 25);
    assert_eq!(summary.steps, 3);
    // start and end only
    assert_eq!(summary.snapshot_count, 2);
}

//! Run Orchestration
//!
//! Drives one model for a fixed number of steps and writes its metrics,
//! snapshots and run summary to an output directory.

use std::fs;
use std::path::Path;

use policy_events::RunSummary;

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::model::PolicyModel;
use crate::output::{write_current_state, write_snapshot, write_snapshot_to_dir, SnapshotGenerator};
use crate::setup::PreferentialAttachment;

/// File names written into the output directory.
pub const METRICS_CSV: &str = "metrics.csv";
pub const METRICS_JSON: &str = "metrics.json";
pub const RUN_SUMMARY: &str = "run_summary.json";

/// Runs the configured simulation and writes every output file.
pub fn run_simulation(config: &SimulationConfig) -> SimResult<RunSummary> {
    config.validate()?;

    let out_dir = Path::new(&config.run.output_dir);
    fs::create_dir_all(out_dir)?;

    let provider = PreferentialAttachment {
        edges_per_node: config.graph.edges_per_node,
    };
    let mut model = PolicyModel::with_provider(config.model.clone(), &provider)?;
    let mut summary = RunSummary::new(model.seed(), model.agents().len());
    summary.initial_edge_count = model.topology().edge_count();

    let mut generator = SnapshotGenerator::new(config.run.snapshot_interval);
    let initial = model.snapshot(generator.next_id(), "simulation_start");
    write_snapshot_to_dir(&initial, out_dir)?;
    write_current_state(&initial, out_dir)?;

    for _ in 0..config.run.steps {
        model.step()?;
        let step = model.step_count();

        if generator.should_snapshot(step) {
            let snapshot = model.snapshot(generator.next_id(), "periodic");
            if let Err(e) = write_snapshot_to_dir(&snapshot, out_dir) {
                tracing::warn!("Could not write snapshot at step {}: {}", step, e);
            }
            if let Err(e) = write_current_state(&snapshot, out_dir) {
                tracing::warn!("Could not write current state at step {}: {}", step, e);
            }
        }

        if step % 10 == 0 {
            tracing::info!(
                "Step {} / {} (mean opinion {:.3}, mean impact {:.3}, {} edges)",
                step,
                config.run.steps,
                model.mean_opinion(),
                model.mean_impact(),
                model.topology().edge_count()
            );
        }
    }

    let last = model.snapshot(generator.next_id(), "simulation_end");
    write_snapshot(&last, out_dir.join("final_state.json"))?;
    write_current_state(&last, out_dir)?;

    model.metrics().write_csv(out_dir.join(METRICS_CSV))?;
    model.metrics().write_json(out_dir.join(METRICS_JSON))?;

    summary.steps = model.step_count();
    summary.final_edge_count = model.topology().edge_count();
    summary.snapshot_count = generator.snapshot_count();
    summary.final_metrics = model.metrics().latest().copied();
    fs::write(out_dir.join(RUN_SUMMARY), serde_json::to_string_pretty(&summary)?)?;

    tracing::info!(run_id = %summary.run_id, steps = summary.steps, "Run complete");
    Ok(summary)
}

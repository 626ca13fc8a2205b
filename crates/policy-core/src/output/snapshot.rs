//! Snapshot Generation
//!
//! Captures every agent's state at a step for visualization consumers.

use std::fs;
use std::path::Path;

use policy_events::{generate_snapshot_id, MetricsRecord, ModelSnapshot};

use crate::components::{AgentStore, Topology};
use crate::output::degree_histogram;

/// Tracks snapshot ids and the snapshot schedule.
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
}

impl SnapshotGenerator {
    /// An interval of 0 disables periodic snapshots.
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
        }
    }

    pub fn should_snapshot(&self, step: u64) -> bool {
        self.snapshot_interval > 0 && step > 0 && step % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// Builds a snapshot of the current agent state.
pub fn build_snapshot(
    snapshot_id: impl Into<String>,
    step: u64,
    triggered_by: &str,
    store: &AgentStore,
    topology: &Topology,
    latest_metrics: Option<MetricsRecord>,
) -> ModelSnapshot {
    let mut snapshot = ModelSnapshot::new(snapshot_id, step, triggered_by);
    snapshot.edge_count = topology.edge_count();
    snapshot.agents = store.snapshots();
    snapshot.degree_histogram = degree_histogram(store);
    snapshot.latest_metrics = latest_metrics;
    snapshot
}

/// Write snapshot to file
pub fn write_snapshot(snapshot: &ModelSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = snapshot.to_json_pretty()?;
    fs::write(path, json)
}

/// Write snapshot into `<dir>/snapshots/`, named by step
pub fn write_snapshot_to_dir(snapshot: &ModelSnapshot, dir: impl AsRef<Path>) -> std::io::Result<()> {
    let snapshots = dir.as_ref().join("snapshots");
    fs::create_dir_all(&snapshots)?;
    write_snapshot(snapshot, snapshots.join(format!("step_{:06}.json", snapshot.step)))
}

/// Write current state (overwrites each time)
pub fn write_current_state(snapshot: &ModelSnapshot, dir: impl AsRef<Path>) -> std::io::Result<()> {
    write_snapshot(snapshot, dir.as_ref().join("current_state.json"))
}

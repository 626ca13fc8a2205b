//! Snapshot Types
//!
//! Serialization structs for model snapshots and run summaries.
//!
//! A snapshot captures every agent's state and the topology size at one
//! step, used by visualization and for debugging individual runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MetricsRecord;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Read-only view of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub node_id: usize,
    pub opinion: f64,
    /// -1, 0 or 1
    pub impact: i8,
    pub marginalized: bool,
    pub privileged: bool,
    pub degree: usize,
}

impl AgentSnapshot {
    /// Group label used by visualization colouring.
    pub fn group_label(&self) -> &'static str {
        if self.privileged {
            "privileged"
        } else if self.marginalized {
            "marginalized"
        } else {
            "neither"
        }
    }

    pub fn is_affected(&self) -> bool {
        self.impact != 0
    }
}

/// Complete model snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub snapshot_id: String,
    pub step: u64,
    pub triggered_by: String,
    pub edge_count: usize,
    pub agents: Vec<AgentSnapshot>,
    /// Agents per connection count
    #[serde(default)]
    pub degree_histogram: BTreeMap<usize, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_metrics: Option<MetricsRecord>,
}

impl ModelSnapshot {
    /// Creates an empty snapshot for the given step.
    pub fn new(snapshot_id: impl Into<String>, step: u64, triggered_by: impl Into<String>) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            step,
            triggered_by: triggered_by.into(),
            edge_count: 0,
            agents: Vec::new(),
            degree_histogram: BTreeMap::new(),
            latest_metrics: None,
        }
    }

    /// Finds an agent by node id.
    pub fn find_agent(&self, node_id: usize) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.node_id == node_id)
    }

    /// Returns the number of agents touched by policy.
    pub fn affected_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_affected()).count()
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Summary written once at the end of a CLI run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub steps: u64,
    pub num_agents: usize,
    pub initial_edge_count: usize,
    pub final_edge_count: usize,
    pub snapshot_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_metrics: Option<MetricsRecord>,
}

impl RunSummary {
    pub fn new(seed: u64, num_agents: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            steps: 0,
            num_agents,
            initial_edge_count: 0,
            final_edge_count: 0,
            snapshot_count: 0,
            final_metrics: None,
        }
    }
}

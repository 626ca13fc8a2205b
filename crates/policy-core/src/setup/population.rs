//! Population Initialization
//!
//! Partitions nodes into privileged, marginalized and neither, then creates
//! one agent per node.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::{AgentStore, Group, NodeId, Topology};
use crate::config::ModelConfig;
use crate::error::TopologyError;

/// Group sizes resolved from the configured fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSummary {
    pub total_agents: usize,
    pub privileged: usize,
    pub marginalized: usize,
}

/// `round(n * fraction)`, at least one, at most `cap`.
fn group_size(n: usize, fraction: f64, cap: usize) -> usize {
    ((n as f64 * fraction).round() as usize).max(1).min(cap)
}

/// Nodes ordered by descending centrality; ties keep ascending node id.
pub fn rank_by_centrality(centrality: &[f64]) -> Vec<NodeId> {
    let mut ranked: Vec<NodeId> = (0..centrality.len()).map(NodeId).collect();
    ranked.sort_by(|a, b| {
        centrality[b.0]
            .partial_cmp(&centrality[a.0])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Resolves each node's group.
///
/// The most central nodes become privileged; marginalized nodes are a
/// uniform sample without replacement from the rest.
pub fn assign_groups(centrality: &[f64], config: &ModelConfig, rng: &mut SmallRng) -> Vec<Group> {
    let n = centrality.len();
    let mut groups = vec![Group::Neither; n];
    if n == 0 {
        return groups;
    }

    let ranked = rank_by_centrality(centrality);
    let num_privileged = group_size(n, config.privileged_fraction, n);
    for node in &ranked[..num_privileged] {
        groups[node.0] = Group::Privileged;
    }

    let mut remaining: Vec<NodeId> = ranked[num_privileged..].to_vec();
    remaining.sort();
    if remaining.is_empty() {
        return groups;
    }
    let num_marginalized = group_size(n, config.marginalized_fraction, remaining.len());
    for node in remaining.choose_multiple(rng, num_marginalized) {
        groups[node.0] = Group::Marginalized;
    }

    groups
}

/// Creates the agent store for `topology` with opinion and impact at zero.
pub fn initialize_population(
    topology: &Topology,
    centrality: &[f64],
    config: &ModelConfig,
    rng: &mut SmallRng,
) -> Result<AgentStore, TopologyError> {
    if centrality.len() != topology.node_count() {
        return Err(TopologyError::CentralityMismatch {
            scores: centrality.len(),
            node_count: topology.node_count(),
        });
    }

    let groups = assign_groups(centrality, config, rng);
    let mut store = AgentStore::from_groups(&groups);
    for agent in store.iter_mut() {
        agent.degree = topology.degree(agent.node())?;
    }
    Ok(store)
}

/// Counts agents per group.
pub fn population_summary(store: &AgentStore) -> PopulationSummary {
    PopulationSummary {
        total_agents: store.len(),
        privileged: store.count_in(Group::Privileged),
        marginalized: store.count_in(Group::Marginalized),
    }
}

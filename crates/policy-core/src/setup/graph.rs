//! Graph Provider
//!
//! Supplies the initial connected network and a centrality score per node.
//! The model consumes it once at construction.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::BTreeSet;

use crate::components::{NodeId, Topology};
use crate::error::TopologyError;

/// A generated network and its per-node centrality.
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    pub topology: Topology,
    /// Indexed by node id
    pub centrality: Vec<f64>,
}

impl GeneratedGraph {
    /// Pairs a topology with degree centrality.
    pub fn with_degree_centrality(topology: Topology) -> Self {
        let centrality = degree_centrality(&topology);
        Self { topology, centrality }
    }
}

/// Source of the initial social network.
pub trait GraphProvider {
    fn generate(&self, node_count: usize, rng: &mut SmallRng) -> Result<GeneratedGraph, TopologyError>;
}

/// Barabási–Albert preferential attachment.
///
/// Starts from a star over `edges_per_node + 1` nodes; every further node
/// links to `edges_per_node` distinct existing nodes picked with probability
/// proportional to their degree. Populations too small for the seed star
/// get a complete graph.
#[derive(Debug, Clone, Copy)]
pub struct PreferentialAttachment {
    pub edges_per_node: usize,
}

impl Default for PreferentialAttachment {
    fn default() -> Self {
        Self { edges_per_node: 2 }
    }
}

impl GraphProvider for PreferentialAttachment {
    fn generate(&self, node_count: usize, rng: &mut SmallRng) -> Result<GeneratedGraph, TopologyError> {
        let m = self.edges_per_node.max(1);
        let mut topology = Topology::new(node_count);

        if node_count <= m {
            for u in 0..node_count {
                for v in (u + 1)..node_count {
                    topology.add_edge(NodeId(u), NodeId(v))?;
                }
            }
            return Ok(GeneratedGraph::with_degree_centrality(topology));
        }

        // Each node appears once per incident edge.
        let mut repeated: Vec<NodeId> = Vec::with_capacity(2 * m * node_count);
        for leaf in 1..=m {
            topology.add_edge(NodeId(0), NodeId(leaf))?;
            repeated.push(NodeId(0));
            repeated.push(NodeId(leaf));
        }

        for source in (m + 1)..node_count {
            let mut targets = BTreeSet::new();
            while targets.len() < m {
                targets.insert(repeated[rng.gen_range(0..repeated.len())]);
            }
            for &target in &targets {
                topology.add_edge(NodeId(source), target)?;
                repeated.push(target);
                repeated.push(NodeId(source));
            }
        }

        Ok(GeneratedGraph::with_degree_centrality(topology))
    }
}

/// Degree divided by `n - 1`; all zeros for graphs of one node or fewer.
pub fn degree_centrality(topology: &Topology) -> Vec<f64> {
    let n = topology.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    (0..n)
        .map(|i| topology.degree(NodeId(i)).unwrap_or(0) as f64 / denom)
        .collect()
}

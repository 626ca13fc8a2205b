//! Social Topology
//!
//! Undirected simple graph over a fixed node set. Edges are only ever
//! added.

use std::collections::{BTreeSet, VecDeque};

use super::agent::NodeId;
use crate::error::TopologyError;

/// Adjacency sets indexed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    adjacency: Vec<BTreeSet<NodeId>>,
    edge_count: usize,
}

impl Topology {
    /// Creates `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a topology from an edge list. Duplicate edges collapse.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, TopologyError> {
        let mut topology = Self::new(node_count);
        for &(u, v) in edges {
            topology.add_edge(NodeId(u), NodeId(v))?;
        }
        Ok(topology)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn check(&self, node: NodeId) -> Result<(), TopologyError> {
        if node.0 < self.adjacency.len() {
            Ok(())
        } else {
            Err(TopologyError::UnknownNode {
                node: node.0,
                node_count: self.adjacency.len(),
            })
        }
    }

    /// Current neighbors of `node`, in ascending id order.
    pub fn neighbors(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, TopologyError> {
        self.check(node)?;
        Ok(&self.adjacency[node.0])
    }

    pub fn degree(&self, node: NodeId) -> Result<usize, TopologyError> {
        Ok(self.neighbors(node)?.len())
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(u.0)
            .map_or(false, |neighbors| neighbors.contains(&v))
    }

    /// Adds the undirected edge `(u, v)`.
    ///
    /// Returns `Ok(false)` when the edge already existed; the topology is
    /// unchanged in that case.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, TopologyError> {
        self.check(u)?;
        self.check(v)?;
        if u == v {
            return Err(TopologyError::SelfLoop(u.0));
        }
        if !self.adjacency[u.0].insert(v) {
            return Ok(false);
        }
        self.adjacency[v.0].insert(u);
        self.edge_count += 1;
        Ok(true)
    }

    /// All edges as `(low, high)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |v| v.0 > u)
                    .map(move |&v| (NodeId(u), v))
            })
            .collect()
    }

    /// Breadth-first reachability from node 0.
    pub fn is_connected(&self) -> bool {
        let n = self.adjacency.len();
        if n == 0 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(u) = queue.pop_front() {
            for v in &self.adjacency[u] {
                if !seen[v.0] {
                    seen[v.0] = true;
                    reached += 1;
                    queue.push_back(v.0);
                }
            }
        }
        reached == n
    }
}

//! Agent Components
//!
//! Per-node agent records and the arena that owns them.

use policy_events::AgentSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TopologyError;

/// Identifier of a graph node; also the agent's index in the [`AgentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How policy has touched an agent.
///
/// Once an agent leaves `Unaffected` it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Impact {
    Negative,
    #[default]
    Unaffected,
    Positive,
}

impl Impact {
    /// Numeric value: -1, 0 or 1.
    pub fn value(self) -> i8 {
        match self {
            Impact::Negative => -1,
            Impact::Unaffected => 0,
            Impact::Positive => 1,
        }
    }

    pub fn is_affected(self) -> bool {
        self != Impact::Unaffected
    }
}

/// Group membership, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Group {
    Privileged,
    Marginalized,
    #[default]
    Neither,
}

impl Group {
    /// The impact policy has on members of this group, if any.
    pub fn policy_impact(self) -> Option<Impact> {
        match self {
            Group::Privileged => Some(Impact::Negative),
            Group::Marginalized => Some(Impact::Positive),
            Group::Neither => None,
        }
    }
}

/// Sign of an opinion as -1, 0 or 1. Zero maps to 0.
pub fn opinion_sign(opinion: f64) -> i8 {
    if opinion > 0.0 {
        1
    } else if opinion < 0.0 {
        -1
    } else {
        0
    }
}

/// A citizen on one graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    node: NodeId,
    group: Group,
    /// Current opinion in (-1, 1)
    pub opinion: f64,
    impact: Impact,
    /// Neighbor count as of the last refresh; observational only
    pub degree: usize,
}

impl Agent {
    pub fn new(node: NodeId, group: Group) -> Self {
        Self {
            node,
            group,
            opinion: 0.0,
            impact: Impact::Unaffected,
            degree: 0,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn impact(&self) -> Impact {
        self.impact
    }

    pub fn is_privileged(&self) -> bool {
        self.group == Group::Privileged
    }

    pub fn is_marginalized(&self) -> bool {
        self.group == Group::Marginalized
    }

    /// Applies the group's policy impact to an unaffected agent.
    ///
    /// Returns false (and changes nothing) if the agent is already
    /// affected or belongs to neither group.
    pub fn apply_policy(&mut self) -> bool {
        if self.impact.is_affected() {
            return false;
        }
        match self.group.policy_impact() {
            Some(impact) => {
                self.impact = impact;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            node_id: self.node.0,
            opinion: self.opinion,
            impact: self.impact.value(),
            marginalized: self.is_marginalized(),
            privileged: self.is_privileged(),
            degree: self.degree,
        }
    }
}

/// Arena of agents addressed by node id.
#[derive(Debug, Clone, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    /// Builds a store from one group per node, in node order.
    pub fn from_groups(groups: &[Group]) -> Self {
        let agents = groups
            .iter()
            .enumerate()
            .map(|(i, &group)| Agent::new(NodeId(i), group))
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&Agent> {
        self.agents.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Agent> {
        self.agents.get_mut(node.0)
    }

    /// Like [`AgentStore::get`], but a missing agent is an invariant violation.
    pub fn agent(&self, node: NodeId) -> Result<&Agent, TopologyError> {
        self.agents.get(node.0).ok_or(TopologyError::UnknownNode {
            node: node.0,
            node_count: self.agents.len(),
        })
    }

    pub fn agent_mut(&mut self, node: NodeId) -> Result<&mut Agent, TopologyError> {
        let node_count = self.agents.len();
        self.agents
            .get_mut(node.0)
            .ok_or(TopologyError::UnknownNode { node: node.0, node_count })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        (0..self.agents.len()).map(NodeId).collect()
    }

    /// Unaffected members of `group`, in node order.
    pub fn eligible(&self, group: Group) -> Vec<NodeId> {
        self.agents
            .iter()
            .filter(|a| a.group == group && !a.impact.is_affected())
            .map(|a| a.node)
            .collect()
    }

    pub fn count_in(&self, group: Group) -> usize {
        self.agents.iter().filter(|a| a.group == group).count()
    }

    pub fn affected_count(&self) -> usize {
        self.agents.iter().filter(|a| a.impact.is_affected()).count()
    }

    /// Read-only rows for visualization and metrics consumers.
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(Agent::snapshot).collect()
    }
}

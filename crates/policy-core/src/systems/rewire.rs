//! Network Rewiring
//!
//! Agents with a strong opinion introduce one neighbor who disagrees with
//! them to one neighbor the policy affected in the direction of their
//! opinion. Edges are only added.
//!
//! Agents are visited in a fresh random order and each agent reads the
//! topology as left by the agents before it in the same pass.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::{opinion_sign, AgentStore, NodeId, Topology};
use crate::error::TopologyError;

/// Tally of one rewiring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewireOutcome {
    /// Agents whose opinion reached the trigger level
    pub triggered: usize,
    /// New edges added to the topology
    pub added: usize,
    /// Pairs drawn that were already connected
    pub existing: usize,
}

/// Attempts one new tie around `node`.
///
/// Returns the drawn `(unaligned, affected)` pair, or `None` when the agent
/// is below the trigger level or lacks candidates for either role.
pub fn rewire_agent(
    node: NodeId,
    store: &AgentStore,
    topology: &Topology,
    trigger_level: f64,
    rng: &mut SmallRng,
) -> Result<Option<(NodeId, NodeId)>, TopologyError> {
    let opinion = store.agent(node)?.opinion;
    if opinion.abs() < trigger_level {
        return Ok(None);
    }
    let sign = opinion_sign(opinion);

    let mut unaligned = Vec::new();
    let mut affected_aligned = Vec::new();
    for &neighbor in topology.neighbors(node)? {
        let other = store.agent(neighbor)?;
        if opinion_sign(other.opinion) != sign {
            unaligned.push(neighbor);
        }
        if other.impact().value() == sign {
            affected_aligned.push(neighbor);
        }
    }

    if unaligned.is_empty() || affected_aligned.is_empty() {
        return Ok(None);
    }
    let Some(&unaligned_pick) = unaligned.choose(rng) else {
        return Ok(None);
    };
    affected_aligned.retain(|&n| n != unaligned_pick);
    let Some(&affected_pick) = affected_aligned.choose(rng) else {
        return Ok(None);
    };

    Ok(Some((unaligned_pick, affected_pick)))
}

/// Runs one rewiring pass over all agents.
pub fn rewire_network(
    store: &AgentStore,
    topology: &mut Topology,
    trigger_level: f64,
    rng: &mut SmallRng,
) -> Result<RewireOutcome, TopologyError> {
    let mut order = store.node_ids();
    order.shuffle(rng);

    let mut outcome = RewireOutcome::default();
    for node in order {
        if store.agent(node)?.opinion.abs() < trigger_level {
            continue;
        }
        outcome.triggered += 1;
        match rewire_agent(node, store, topology, trigger_level, rng)? {
            Some((unaligned, affected)) => {
                if topology.add_edge(unaligned, affected)? {
                    outcome.added += 1;
                } else {
                    outcome.existing += 1;
                }
            }
            None => tracing::trace!(%node, "No rewiring candidates"),
        }
    }
    Ok(outcome)
}

//! Opinion Update
//!
//! Each agent's opinion is a logistic transform of the summed impacts of its
//! current neighbors, scaled to (-1, 1).

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::{AgentStore, Topology};
use crate::error::TopologyError;

/// `2 / (1 + e^-s) - 1`
pub fn logistic_opinion(impact_sum: f64) -> f64 {
    2.0 / (1.0 + (-impact_sum).exp()) - 1.0
}

/// Recomputes every opinion, visiting agents in a fresh random order.
///
/// Only impacts are read, and impacts do not change here, so the order
/// does not affect the resulting values.
pub fn update_opinions(
    store: &mut AgentStore,
    topology: &Topology,
    rng: &mut SmallRng,
) -> Result<(), TopologyError> {
    let mut order = store.node_ids();
    order.shuffle(rng);

    for node in order {
        let mut impact_sum = 0i64;
        for &neighbor in topology.neighbors(node)? {
            impact_sum += i64::from(store.agent(neighbor)?.impact().value());
        }
        store.agent_mut(node)?.opinion = logistic_opinion(impact_sum as f64);
    }
    Ok(())
}

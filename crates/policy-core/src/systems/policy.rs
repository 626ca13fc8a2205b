//! Policy Allocation
//!
//! Draws not-yet-affected agents from each group and sets their impact:
//! +1 for marginalized agents, -1 for privileged agents.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::{AgentStore, Group};

/// Requested number of new agents per group for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationTargets {
    pub marginalized: usize,
    pub privileged: usize,
}

/// Agents actually affected by one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub marginalized: usize,
    pub privileged: usize,
}

impl AllocationOutcome {
    pub fn total(&self) -> usize {
        self.marginalized + self.privileged
    }
}

/// `max(1, round(n * rate * bias))` for the marginalized group and
/// `max(1, round(n * rate * (1 - bias)))` for the privileged group.
pub fn allocation_targets(population: usize, expansion_rate: f64, bias: f64) -> AllocationTargets {
    let scaled = population as f64 * expansion_rate;
    let target = |share: f64| ((scaled * share).round() as usize).max(1);
    AllocationTargets {
        marginalized: target(bias),
        privileged: target(1.0 - bias),
    }
}

/// Runs one allocation call.
///
/// An empty eligible pool yields a zero draw for that group; the other
/// group is still served.
pub fn allocate_policy(
    store: &mut AgentStore,
    expansion_rate: f64,
    bias: f64,
    rng: &mut SmallRng,
) -> AllocationOutcome {
    let targets = allocation_targets(store.len(), expansion_rate, bias);
    let mut outcome = AllocationOutcome::default();

    for (group, target) in [
        (Group::Marginalized, targets.marginalized),
        (Group::Privileged, targets.privileged),
    ] {
        let pool = store.eligible(group);
        if pool.is_empty() {
            tracing::info!(?group, "No unaffected agents left, skipping allocation for group");
            continue;
        }

        let drawn: Vec<_> = pool
            .choose_multiple(rng, target.min(pool.len()))
            .copied()
            .collect();
        let mut affected = 0;
        for node in drawn {
            if let Some(agent) = store.get_mut(node) {
                if agent.apply_policy() {
                    affected += 1;
                }
            }
        }

        match group {
            Group::Marginalized => outcome.marginalized = affected,
            Group::Privileged => outcome.privileged = affected,
            Group::Neither => {}
        }
    }

    tracing::debug!(
        marginalized = outcome.marginalized,
        privileged = outcome.privileged,
        "Policy allocated"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Impact, NodeId};
    use rand::SeedableRng;

    fn store(marginalized: usize, privileged: usize, neither: usize) -> AgentStore {
        let mut groups = vec![Group::Marginalized; marginalized];
        groups.extend(vec![Group::Privileged; privileged]);
        groups.extend(vec![Group::Neither; neither]);
        AgentStore::from_groups(&groups)
    }

    #[test]
    fn test_targets_symmetric() {
        let targets = allocation_targets(300, 0.02, 0.5);
        assert_eq!(targets, AllocationTargets { marginalized: 3, privileged: 3 });
    }

    #[test]
    fn test_targets_biased() {
        let targets = allocation_targets(100, 0.1, 0.8);
        assert_eq!(targets, AllocationTargets { marginalized: 8, privileged: 2 });
    }

    #[test]
    fn test_targets_floor_of_one() {
        let targets = allocation_targets(10, 0.0, 0.5);
        assert_eq!(targets, AllocationTargets { marginalized: 1, privileged: 1 });

        let targets = allocation_targets(10, 0.5, 1.0);
        assert_eq!(targets.privileged, 1);
        assert_eq!(targets.marginalized, 5);
    }

    #[test]
    fn test_allocation_respects_pool_size() {
        let mut store = store(2, 3, 5);
        let mut rng = SmallRng::seed_from_u64(4);
        let outcome = allocate_policy(&mut store, 1.0, 0.5, &mut rng);

        assert_eq!(outcome, AllocationOutcome { marginalized: 2, privileged: 3 });
        assert_eq!(store.affected_count(), 5);
        for agent in store.iter() {
            match agent.group() {
                Group::Marginalized => assert_eq!(agent.impact(), Impact::Positive),
                Group::Privileged => assert_eq!(agent.impact(), Impact::Negative),
                Group::Neither => assert_eq!(agent.impact(), Impact::Unaffected),
            }
        }
    }

    #[test]
    fn test_empty_pool_is_not_an_error() {
        let mut store = store(1, 0, 3);
        let mut rng = SmallRng::seed_from_u64(4);

        let first = allocate_policy(&mut store, 0.0, 0.5, &mut rng);
        assert_eq!(first, AllocationOutcome { marginalized: 1, privileged: 0 });

        let second = allocate_policy(&mut store, 0.0, 0.5, &mut rng);
        assert_eq!(second.total(), 0);
        assert_eq!(store.affected_count(), 1);
    }

    #[test]
    fn test_never_revisits_affected_agents() {
        let mut store = store(4, 4, 0);
        let mut rng = SmallRng::seed_from_u64(12);
        let mut total = 0;
        for _ in 0..6 {
            let before: Vec<Impact> = store.iter().map(|a| a.impact()).collect();
            let outcome = allocate_policy(&mut store, 0.0, 0.5, &mut rng);
            total += outcome.total();
            for (agent, old) in store.iter().zip(before) {
                if old.is_affected() {
                    assert_eq!(agent.impact(), old);
                }
            }
        }
        assert_eq!(total, 8);
        assert!(store.get(NodeId(7)).unwrap().impact().is_affected());
    }
}

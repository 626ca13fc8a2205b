//! Connection Counting

use crate::components::{AgentStore, Topology};
use crate::error::TopologyError;

/// Copies each node's current neighbor count into its agent.
pub fn refresh_degrees(store: &mut AgentStore, topology: &Topology) -> Result<(), TopologyError> {
    for agent in store.iter_mut() {
        agent.degree = topology.degree(agent.node())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Group, NodeId};

    #[test]
    fn test_refresh_follows_new_edges() {
        let mut topology = Topology::from_edges(3, &[(0, 1)]).unwrap();
        let mut store = AgentStore::from_groups(&[Group::Neither; 3]);
        refresh_degrees(&mut store, &topology).unwrap();
        assert_eq!(store.get(NodeId(2)).unwrap().degree, 0);

        topology.add_edge(NodeId(1), NodeId(2)).unwrap();
        refresh_degrees(&mut store, &topology).unwrap();
        assert_eq!(store.get(NodeId(1)).unwrap().degree, 2);
        assert_eq!(store.get(NodeId(2)).unwrap().degree, 1);
    }

    #[test]
    fn test_store_larger_than_topology() {
        let topology = Topology::new(1);
        let mut store = AgentStore::from_groups(&[Group::Neither; 2]);
        assert!(refresh_degrees(&mut store, &topology).is_err());
    }
}

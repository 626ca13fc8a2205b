//! Metrics Collection
//!
//! Aggregate statistics computed from agent state once per step, kept in an
//! append-only in-memory series.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use policy_events::MetricsRecord;

use crate::components::{AgentStore, Group, Topology};

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean opinion over all agents.
pub fn mean_opinion(store: &AgentStore) -> f64 {
    mean(store.iter().map(|a| a.opinion))
}

/// Mean impact over all agents.
pub fn mean_impact(store: &AgentStore) -> f64 {
    mean(store.iter().map(|a| f64::from(a.impact().value())))
}

/// Mean opinion over members of `group`.
pub fn group_mean_opinion(store: &AgentStore, group: Group) -> f64 {
    mean(store.iter().filter(|a| a.group() == group).map(|a| a.opinion))
}

/// Number of agents per connection count.
pub fn degree_histogram(store: &AgentStore) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for agent in store.iter() {
        *histogram.entry(agent.degree).or_insert(0) += 1;
    }
    histogram
}

/// Append-only series of per-step metrics.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    records: Vec<MetricsRecord>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes and appends the row for `step`.
    pub fn collect(&mut self, step: u64, store: &AgentStore, topology: &Topology) -> MetricsRecord {
        let record = MetricsRecord {
            step,
            mean_opinion: mean_opinion(store),
            mean_impact: mean_impact(store),
            privileged_mean_opinion: group_mean_opinion(store, Group::Privileged),
            marginalized_mean_opinion: group_mean_opinion(store, Group::Marginalized),
            affected_count: store.affected_count(),
            edge_count: topology.edge_count(),
        };
        self.records.push(record);
        record
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header plus one line per record.
    pub fn to_csv(&self) -> String {
        let mut out = MetricsRecord::csv_header();
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.to_csv_row());
            out.push('\n');
        }
        out
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_csv())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NodeId;

    fn sample_store() -> AgentStore {
        let mut store = AgentStore::from_groups(&[
            Group::Privileged,
            Group::Marginalized,
            Group::Marginalized,
            Group::Neither,
        ]);
        for agent in store.iter_mut() {
            agent.apply_policy();
        }
        store.get_mut(NodeId(0)).unwrap().opinion = -0.4;
        store.get_mut(NodeId(1)).unwrap().opinion = 0.2;
        store.get_mut(NodeId(2)).unwrap().opinion = 0.6;
        store
    }

    #[test]
    fn test_means() {
        let store = sample_store();
        assert!((mean_opinion(&store) - 0.1).abs() < 1e-12);
        assert!((mean_impact(&store) - 0.25).abs() < 1e-12);
        assert!((group_mean_opinion(&store, Group::Marginalized) - 0.4).abs() < 1e-12);
        assert!((group_mean_opinion(&store, Group::Privileged) + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_empty_store_means_are_zero() {
        let store = AgentStore::default();
        assert_eq!(mean_opinion(&store), 0.0);
        assert_eq!(mean_impact(&store), 0.0);
    }

    #[test]
    fn test_collect_appends() {
        let store = sample_store();
        let topology = Topology::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let mut collector = MetricsCollector::new();

        collector.collect(0, &store, &topology);
        let second = collector.collect(1, &store, &topology);

        assert_eq!(collector.len(), 2);
        assert_eq!(second.step, 1);
        assert_eq!(second.affected_count, 3);
        assert_eq!(second.edge_count, 2);
        assert_eq!(collector.latest().map(|r| r.step), Some(1));
    }

    #[test]
    fn test_csv_export() {
        let store = sample_store();
        let topology = Topology::new(4);
        let mut collector = MetricsCollector::new();
        collector.collect(0, &store, &topology);
        collector.collect(1, &store, &topology);

        let csv = collector.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("step,mean_opinion,mean_impact"));
        assert!(lines[2].starts_with("1,"));
    }

    #[test]
    fn test_degree_histogram() {
        let mut store = sample_store();
        store.get_mut(NodeId(0)).unwrap().degree = 2;
        store.get_mut(NodeId(1)).unwrap().degree = 2;
        store.get_mut(NodeId(2)).unwrap().degree = 1;

        let histogram = degree_histogram(&store);
        assert_eq!(histogram.get(&2), Some(&2));
        assert_eq!(histogram.get(&1), Some(&1));
        assert_eq!(histogram.get(&0), Some(&1));
    }
}

//! Metrics Records
//!
//! One flat row per simulation step, suitable for tabular export.

use serde::{Deserialize, Serialize};

/// Column names of a metrics row, in export order.
pub const METRIC_COLUMNS: [&str; 7] = [
    "step",
    "mean_opinion",
    "mean_impact",
    "privileged_mean_opinion",
    "marginalized_mean_opinion",
    "affected_count",
    "edge_count",
];

/// Aggregate statistics collected at the end of one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub step: u64,
    /// Mean opinion over all agents ("policy support")
    pub mean_opinion: f64,
    /// Mean impact over all agents ("social benefit")
    pub mean_impact: f64,
    /// Mean opinion over privileged agents (0.0 if the group is empty)
    pub privileged_mean_opinion: f64,
    /// Mean opinion over marginalized agents (0.0 if the group is empty)
    pub marginalized_mean_opinion: f64,
    /// Agents with nonzero impact
    pub affected_count: usize,
    /// Undirected edges in the topology
    pub edge_count: usize,
}

impl MetricsRecord {
    /// Formats the record as one CSV line (no trailing newline).
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.step,
            self.mean_opinion,
            self.mean_impact,
            self.privileged_mean_opinion,
            self.marginalized_mean_opinion,
            self.affected_count,
            self.edge_count,
        )
    }

    /// The CSV header matching [`MetricsRecord::to_csv_row`].
    pub fn csv_header() -> String {
        METRIC_COLUMNS.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricsRecord {
        MetricsRecord {
            step: 3,
            mean_opinion: 0.25,
            mean_impact: -0.5,
            privileged_mean_opinion: 0.0,
            marginalized_mean_opinion: 0.75,
            affected_count: 4,
            edge_count: 17,
        }
    }

    #[test]
    fn test_csv_row_matches_header_width() {
        let header = MetricsRecord::csv_header();
        let row = sample().to_csv_row();
        assert_eq!(header.split(',').count(), row.split(',').count());
        assert_eq!(row, "3,0.25,-0.5,0,0.75,4,17");
    }

    #[test]
    fn test_header_starts_with_step() {
        assert!(MetricsRecord::csv_header().starts_with("step,mean_opinion,mean_impact"));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for column in METRIC_COLUMNS {
            assert!(json.get(column).is_some(), "missing field {}", column);
        }
    }
}

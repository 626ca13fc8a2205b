//! Shared output types for the policy opinion simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The simulation core produces them; plotting, batch aggregation and
//! visualization tools consume them.

pub mod metrics;
pub mod snapshot;

pub use metrics::{MetricsRecord, METRIC_COLUMNS};
pub use snapshot::{generate_snapshot_id, AgentSnapshot, ModelSnapshot, RunSummary};

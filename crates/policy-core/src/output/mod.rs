//! Output Generation
//!
//! Per-step metrics collection and model snapshots.

pub mod metrics;
pub mod snapshot;

pub use metrics::*;
pub use snapshot::*;

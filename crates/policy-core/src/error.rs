//! Error Types
//!
//! Configuration errors fail construction; topology errors are invariant
//! violations. Allocation starvation and rewiring infeasibility are not
//! errors and never reach these types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population size must be greater than zero")]
    InvalidPopulation,

    #[error("{name} must be within [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("policy expansion rate must be finite and non-negative, got {0}")]
    NegativeExpansion(f64),

    #[error("trigger level must be finite and positive, got {0}")]
    InvalidTriggerLevel(f64),

    #[error("configured {configured} agents but the graph has {nodes} nodes")]
    PopulationMismatch { configured: usize, nodes: usize },

    #[error("graph provider needs at least one edge per new node")]
    InvalidEdgesPerNode,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Topology invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("node {node} is not part of the topology ({node_count} nodes)")]
    UnknownNode { node: usize, node_count: usize },

    #[error("self-loop on node {0} is not allowed in a simple graph")]
    SelfLoop(usize),

    #[error("centrality has {scores} scores for {node_count} nodes")]
    CentralityMismatch { scores: usize, node_count: usize },
}

/// Top-level error for model construction, stepping and output.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("topology invariant violated: {0}")]
    Topology(#[from] TopologyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

//! Core of the policy opinion simulation: agents on an evolving social
//! network, policy allocation, opinion update and network rewiring.

pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod runner;
pub mod setup;
pub mod systems;

pub use components::{Agent, AgentStore, Group, Impact, NodeId, Topology};
pub use config::{GraphConfig, ModelConfig, RunConfig, SimulationConfig};
pub use error::{ConfigError, SimError, SimResult, TopologyError};
pub use model::PolicyModel;
pub use setup::{GeneratedGraph, GraphProvider, PreferentialAttachment};

//! Configuration System
//!
//! Model parameters, graph provider settings and CLI run settings, loaded
//! from a TOML file so experiments can be adjusted without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "policy.toml";

/// Complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Parameters of a single model instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Population size, one agent per graph node
    pub num_agents: usize,
    /// Share of nodes (by centrality) that are privileged
    pub privileged_fraction: f64,
    /// Share of nodes sampled as marginalized from the non-privileged rest
    pub marginalized_fraction: f64,
    /// Share of the population targeted by one allocation call
    pub rel_policy_expansion: f64,
    /// Share of each allocation aimed at the marginalized group
    pub policy_bias: f64,
    /// Opinion magnitude at which an agent starts forming new ties
    pub trigger_level: f64,
    /// Allocate again whenever mean opinion falls below mean impact
    pub policy_reaction: bool,
    /// Random seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_agents: 10,
            privileged_fraction: 0.2,
            marginalized_fraction: 0.1,
            rel_policy_expansion: 0.01,
            policy_bias: 0.5,
            trigger_level: 0.35,
            policy_reaction: false,
            seed: None,
        }
    }
}

impl ModelConfig {
    /// Checks every bound; called before any agent is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_agents == 0 {
            return Err(ConfigError::InvalidPopulation);
        }
        check_fraction("privileged_fraction", self.privileged_fraction)?;
        check_fraction("marginalized_fraction", self.marginalized_fraction)?;
        check_fraction("policy_bias", self.policy_bias)?;
        if !self.rel_policy_expansion.is_finite() || self.rel_policy_expansion < 0.0 {
            return Err(ConfigError::NegativeExpansion(self.rel_policy_expansion));
        }
        // Levels above 1 are legal: they are simply never reached.
        if !self.trigger_level.is_finite() || self.trigger_level <= 0.0 {
            return Err(ConfigError::InvalidTriggerLevel(self.trigger_level));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

/// Preferential-attachment graph provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges attached from each new node
    pub edges_per_node: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { edges_per_node: 2 }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edges_per_node == 0 {
            return Err(ConfigError::InvalidEdgesPerNode);
        }
        Ok(())
    }
}

/// Settings used only by the command line runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of steps to simulate
    pub steps: u64,
    /// Directory for metrics, snapshots and the run summary
    pub output_dir: String,
    /// Steps between snapshots (0 disables periodic snapshots)
    pub snapshot_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 60,
            output_dir: "output".to_string(),
            snapshot_interval: 10,
        }
    }
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads from `path` if it exists, otherwise returns defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Renders the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        self.graph.validate()
    }
}

//! Policy Model
//!
//! Owns the topology, the agents, the random source and the metrics series,
//! and advances them one discrete step at a time.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use policy_events::{AgentSnapshot, ModelSnapshot};

use crate::components::{AgentStore, Topology};
use crate::config::ModelConfig;
use crate::error::{ConfigError, SimResult};
use crate::output::{build_snapshot, mean_impact, mean_opinion, MetricsCollector};
use crate::setup::{
    initialize_population, population_summary, GeneratedGraph, GraphProvider,
    PreferentialAttachment,
};
use crate::systems::{
    allocate_policy, refresh_degrees, rewire_network, update_opinions, AllocationOutcome,
};

/// One simulation instance.
///
/// Construction runs the initial policy allocation; each [`PolicyModel::step`]
/// then runs opinion update, rewiring, the optional reactive allocation and
/// metrics collection, in that order.
#[derive(Debug, Clone)]
pub struct PolicyModel {
    config: ModelConfig,
    seed: u64,
    rng: SmallRng,
    topology: Topology,
    agents: AgentStore,
    metrics: MetricsCollector,
    step_count: u64,
    allocation_calls: u64,
}

impl PolicyModel {
    /// Builds a model on a preferential-attachment graph with two edges per
    /// new node.
    pub fn new(config: ModelConfig) -> SimResult<Self> {
        Self::with_provider(config, &PreferentialAttachment::default())
    }

    /// Builds a model on a graph generated by `provider`.
    pub fn with_provider<P: GraphProvider>(config: ModelConfig, provider: &P) -> SimResult<Self> {
        config.validate()?;
        let seed = resolve_seed(&config);
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = provider.generate(config.num_agents, &mut rng)?;
        Self::build(config, seed, rng, graph)
    }

    /// Builds a model on a pre-built graph.
    pub fn with_graph(config: ModelConfig, graph: GeneratedGraph) -> SimResult<Self> {
        config.validate()?;
        let seed = resolve_seed(&config);
        let rng = SmallRng::seed_from_u64(seed);
        Self::build(config, seed, rng, graph)
    }

    fn build(config: ModelConfig, seed: u64, mut rng: SmallRng, graph: GeneratedGraph) -> SimResult<Self> {
        let nodes = graph.topology.node_count();
        if nodes != config.num_agents {
            return Err(ConfigError::PopulationMismatch {
                configured: config.num_agents,
                nodes,
            }
            .into());
        }

        let agents = initialize_population(&graph.topology, &graph.centrality, &config, &mut rng)?;
        let mut model = Self {
            config,
            seed,
            rng,
            topology: graph.topology,
            agents,
            metrics: MetricsCollector::new(),
            step_count: 0,
            allocation_calls: 0,
        };

        let initial = model.apply_policy(model.config.rel_policy_expansion);
        let summary = population_summary(&model.agents);
        tracing::info!(
            seed,
            agents = summary.total_agents,
            privileged = summary.privileged,
            marginalized = summary.marginalized,
            edges = model.topology.edge_count(),
            initially_affected = initial.total(),
            "Model initialized"
        );
        Ok(model)
    }

    /// Runs one allocation call with the configured bias.
    pub fn apply_policy(&mut self, expansion_rate: f64) -> AllocationOutcome {
        self.allocation_calls += 1;
        allocate_policy(&mut self.agents, expansion_rate, self.config.policy_bias, &mut self.rng)
    }

    /// Advances the model by one step.
    pub fn step(&mut self) -> SimResult<()> {
        update_opinions(&mut self.agents, &self.topology, &mut self.rng)?;

        let rewired = rewire_network(
            &self.agents,
            &mut self.topology,
            self.config.trigger_level,
            &mut self.rng,
        )?;
        refresh_degrees(&mut self.agents, &self.topology)?;

        let mut reacted = None;
        if self.config.policy_reaction && self.mean_opinion() < self.mean_impact() {
            reacted = Some(self.apply_policy(self.config.rel_policy_expansion));
        }

        self.step_count += 1;
        let record = self.metrics.collect(self.step_count, &self.agents, &self.topology);

        tracing::debug!(
            step = self.step_count,
            triggered = rewired.triggered,
            edges_added = rewired.added,
            edges_existing = rewired.existing,
            reactive_allocation = ?reacted.map(|o| o.total()),
            mean_opinion = record.mean_opinion,
            mean_impact = record.mean_impact,
            "Step complete"
        );
        Ok(())
    }

    /// Runs `steps` consecutive steps.
    pub fn run(&mut self, steps: u64) -> SimResult<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    pub fn mean_opinion(&self) -> f64 {
        mean_opinion(&self.agents)
    }

    pub fn mean_impact(&self) -> f64 {
        mean_impact(&self.agents)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The seed actually used, including one drawn from entropy.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Steps completed so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Allocation calls made so far, including the initial one.
    pub fn allocation_calls(&self) -> u64 {
        self.allocation_calls
    }

    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.snapshots()
    }

    pub fn snapshot(&self, snapshot_id: impl Into<String>, triggered_by: &str) -> ModelSnapshot {
        build_snapshot(
            snapshot_id,
            self.step_count,
            triggered_by,
            &self.agents,
            &self.topology,
            self.metrics.latest().copied(),
        )
    }
}

fn resolve_seed(config: &ModelConfig) -> u64 {
    config.seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        tracing::info!(seed, "No seed configured, drew one from entropy");
        seed
    })
}

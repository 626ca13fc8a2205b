//! Policy Opinion Simulation
//!
//! Runs one model instance from a TOML configuration plus command line
//! overrides and writes metrics and snapshots for external analysis.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use policy_core::config::{SimulationConfig, DEFAULT_CONFIG_PATH};
use policy_core::runner::{run_simulation, METRICS_CSV};
use policy_core::SimError;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "policy_sim")]
#[command(about = "Opinion dynamics and policy impact on an evolving social network")]
struct Args {
    /// TOML configuration file (defaults are used if it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Population size
    #[arg(long)]
    num_agents: Option<usize>,

    /// Share of most central nodes that are privileged
    #[arg(long)]
    privileged_fraction: Option<f64>,

    /// Share of nodes sampled as marginalized
    #[arg(long)]
    marginalized_fraction: Option<f64>,

    /// Share of the population reached by one allocation call
    #[arg(long)]
    rel_policy_expansion: Option<f64>,

    /// Share of each allocation aimed at the marginalized group
    #[arg(long)]
    policy_bias: Option<f64>,

    /// Opinion magnitude that triggers new ties
    #[arg(long)]
    trigger_level: Option<f64>,

    /// Allocate again whenever mean opinion drops below mean impact
    #[arg(long)]
    policy_reaction: Option<bool>,

    /// Edges attached from each new node in the generated graph
    #[arg(long)]
    edges_per_node: Option<usize>,

    /// Directory for metrics and snapshots
    #[arg(long)]
    output_dir: Option<String>,

    /// Steps between snapshots (0 disables)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut SimulationConfig) {
        let model = &mut config.model;
        if let Some(seed) = self.seed {
            model.seed = Some(seed);
        }
        if let Some(v) = self.num_agents {
            model.num_agents = v;
        }
        if let Some(v) = self.privileged_fraction {
            model.privileged_fraction = v;
        }
        if let Some(v) = self.marginalized_fraction {
            model.marginalized_fraction = v;
        }
        if let Some(v) = self.rel_policy_expansion {
            model.rel_policy_expansion = v;
        }
        if let Some(v) = self.policy_bias {
            model.policy_bias = v;
        }
        if let Some(v) = self.trigger_level {
            model.trigger_level = v;
        }
        if let Some(v) = self.policy_reaction {
            model.policy_reaction = v;
        }
        if let Some(v) = self.edges_per_node {
            config.graph.edges_per_node = v;
        }
        if let Some(v) = self.steps {
            config.run.steps = v;
        }
        if let Some(v) = &self.output_dir {
            config.run.output_dir = v.clone();
        }
        if let Some(v) = self.snapshot_interval {
            config.run.snapshot_interval = v;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = SimulationConfig::load_or_default(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let model = &config.model;
    println!("Policy Opinion Simulation");
    println!("=========================");
    println!("Agents: {}", model.num_agents);
    println!("Privileged fraction: {}", model.privileged_fraction);
    println!("Marginalized fraction: {}", model.marginalized_fraction);
    println!("Policy expansion: {} (bias {})", model.rel_policy_expansion, model.policy_bias);
    println!("Trigger level: {}", model.trigger_level);
    println!("Reactive policy: {}", model.policy_reaction);
    println!("Steps: {}", config.run.steps);
    println!();

    let summary = run_simulation(&config)?;

    println!();
    println!("Simulation complete. Ran {} steps (seed {}).", summary.steps, summary.seed);
    println!(
        "Edges: {} -> {}",
        summary.initial_edge_count, summary.final_edge_count
    );
    if let Some(last) = summary.final_metrics {
        println!(
            "Final mean opinion {:.4}, mean impact {:.4}, {} agents affected",
            last.mean_opinion, last.mean_impact, last.affected_count
        );
    }
    println!(
        "Wrote {} snapshots and {}/{}",
        summary.snapshot_count, config.run.output_dir, METRICS_CSV
    );
    Ok(())
}

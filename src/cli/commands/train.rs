//! Train command - run a learning agent through a simulation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::GridWorld,
    app::AgentConfig,
    cli::output::{print_section, print_stats_table},
    pipeline::{JsonlObserver, ProgressObserver, RunResult, SimulationConfig, TrialRunner},
    q_learning::QLearningDriver,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    run: RunResult,
    q_table_entries: usize,
    final_exploration_rate: f64,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    trials: usize,
    learning_rate: f64,
    discount_factor: f64,
    eps_cutoff_fraction: f64,
    seed: Option<u64>,
}

/// Resolve a `--summary` argument to a concrete `.json` file path.
///
/// A trailing separator (or a path with no file name) is a directory
/// target and receives the default file name; anything else is forced to
/// a `.json` extension.
fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let is_directory_target = raw
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR)
        || raw.file_name().is_none();
    if is_directory_target {
        return raw.join("training_summary.json");
    }

    let already_json = raw
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if already_json {
        raw.to_path_buf()
    } else {
        let mut path = raw.to_path_buf();
        path.set_extension("json");
        path
    }
}

#[derive(Parser, Debug)]
#[command(about = "Run a learning agent through a simulation")]
pub struct TrainArgs {
    /// Number of trials to drive
    #[arg(long, short = 't', default_value_t = 100)]
    pub trials: usize,

    /// Learning rate α
    #[arg(long, default_value_t = 0.5)]
    pub learning_rate: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.25)]
    pub discount_factor: f64,

    /// Fraction of trials spent in pure random exploration
    #[arg(long, default_value_t = 0.25)]
    pub eps_cutoff: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL step observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_config = AgentConfig::new(args.trials)
        .with_learning_rate(args.learning_rate)
        .with_discount_factor(args.discount_factor)
        .with_eps_cutoff_fraction(args.eps_cutoff);
    agent_config.validate()?;

    let mut agent = QLearningDriver::new(&agent_config);
    // Offset the world seed so agent and world do not share a stream.
    let mut world = GridWorld::new(args.seed.map(|s| s.wrapping_add(1)));

    // The runner applies the seed to the agent at run start.
    let sim_config = SimulationConfig {
        trials: args.trials,
        seed: args.seed,
    };
    let mut runner = TrialRunner::new(sim_config);
    if !args.quiet {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = runner.run(&mut agent, &mut world)?;

    print_section("Run summary");
    print_stats_table(&[
        ("Trials", result.total_trials.to_string()),
        (
            "Successes",
            format!(
                "{} ({:.1}%)",
                result.successes,
                result.success_rate * 100.0
            ),
        ),
        (
            "Post-warm-up successes",
            format!(
                "{}/{} ({:.1}%)",
                result.exploit_successes,
                result.exploit_trials,
                result.exploit_success_ratio * 100.0
            ),
        ),
        (
            "Post-warm-up penalties",
            result.exploit_penalties.to_string(),
        ),
        ("Q-table entries", agent.q_table().len().to_string()),
        (
            "Final exploration rate",
            format!("{:.3e}", agent.exploration_rate()),
        ),
    ]);

    if let Some(raw_path) = &args.summary {
        let path = sanitize_summary_path(raw_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let summary = TrainingSummaryFile {
            run: result,
            q_table_entries: agent.q_table().len(),
            final_exploration_rate: agent.exploration_rate(),
            metadata: SummaryMetadata {
                trials: args.trials,
                learning_rate: args.learning_rate,
                discount_factor: args.discount_factor,
                eps_cutoff_fraction: args.eps_cutoff,
                seed: args.seed,
            },
        };
        let file = std::fs::File::create(&path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

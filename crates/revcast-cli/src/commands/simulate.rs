use std::io::Write;

use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use revcast_core::types::{ComputationOutput, ResultRecord};
use revcast_core::{simulate_with, CancelToken, RankingPolicy, SimulationInput, Strategy};

use crate::input;

/// Arguments shared by the greedy, exhaustive, and sample runs
#[derive(Args)]
pub struct RunArgs {
    /// Path to JSON configuration file (or pipe it on stdin)
    #[arg(long)]
    pub config: Option<String>,

    /// Ranking policy for the retained result sets
    #[arg(long, default_value = "profit")]
    pub ranking: RankingArg,

    /// Suppress the stderr progress line
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum RankingArg {
    /// Largest net profit first
    Profit,
    /// Lightest workload first
    Workload,
}

impl From<RankingArg> for RankingPolicy {
    fn from(arg: RankingArg) -> Self {
        match arg {
            RankingArg::Profit => RankingPolicy::ByProfit,
            RankingArg::Workload => RankingPolicy::ByWorkload,
        }
    }
}

/// Result sets flattened to exportable records.
#[derive(Debug, Serialize)]
struct RunReport {
    qualified: Vec<ResultRecord>,
    near_qualified: Vec<ResultRecord>,
    candidates_evaluated: u64,
    cancelled: bool,
}

pub fn run_greedy(args: RunArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_strategy(args, Strategy::Greedy)
}

pub fn run_exhaustive(args: RunArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_strategy(args, Strategy::Exhaustive)
}

pub fn run_sample(args: RunArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_strategy(args, Strategy::StochasticBatched)
}

fn run_strategy(args: RunArgs, strategy: Strategy) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::load_config(args.config.as_deref())?;
    let sim_input = SimulationInput {
        config,
        strategy,
        ranking: args.ranking.clone().into(),
    };

    let quiet = args.quiet;
    let mut progress = |done: u64, total: u128| {
        if !quiet {
            eprint!("\r{} {}/{} candidates", "searching".cyan(), done, total);
            let _ = std::io::stderr().flush();
        }
    };

    let output = simulate_with(&sim_input, &mut progress, &CancelToken::new())?;
    if !quiet && output.result.candidates_evaluated > 0 {
        eprintln!();
    }

    let report = ComputationOutput {
        result: RunReport {
            qualified: output.result.qualified.iter().map(|r| r.to_record()).collect(),
            near_qualified: output
                .result
                .near_qualified
                .iter()
                .map(|r| r.to_record())
                .collect(),
            candidates_evaluated: output.result.candidates_evaluated,
            cancelled: output.result.cancelled,
        },
        methodology: output.methodology,
        assumptions: output.assumptions,
        warnings: output.warnings,
        metadata: output.metadata,
    };
    Ok(serde_json::to_value(report)?)
}

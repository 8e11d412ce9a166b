use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use revcast_core::plan::{self, MAX_EXHAUSTIVE_CANDIDATES};
use revcast_core::Strategy;

use crate::input;

/// Arguments for the cardinality estimate
#[derive(Args)]
pub struct CardinalityArgs {
    /// Path to JSON configuration file (or pipe it on stdin)
    #[arg(long)]
    pub config: Option<String>,

    /// Strategy whose candidate space to estimate
    #[arg(long, default_value = "exhaustive")]
    pub strategy: StrategyArg,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum StrategyArg {
    Greedy,
    Exhaustive,
    Sample,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Exhaustive => Strategy::Exhaustive,
            StrategyArg::Sample => Strategy::StochasticBatched,
        }
    }
}

#[derive(Debug, Serialize)]
struct CardinalityReport {
    strategy: Strategy,
    /// Candidate count as a string: the exhaustive product can exceed
    /// what a JSON number carries.
    candidates: String,
    exceeds_cap: bool,
    cap: String,
}

/// Report how many candidates a run would evaluate, so a caller can
/// warn or cap before materializing anything.
pub fn run_cardinality(args: CardinalityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::load_config(args.config.as_deref())?;
    config.validate()?;

    let strategy: Strategy = args.strategy.into();
    let candidates = plan::candidate_space(&config, strategy);

    let report = CardinalityReport {
        strategy,
        candidates: candidates.to_string(),
        exceeds_cap: strategy == Strategy::Exhaustive && candidates > MAX_EXHAUSTIVE_CANDIDATES,
        cap: MAX_EXHAUSTIVE_CANDIDATES.to_string(),
    };
    Ok(serde_json::to_value(report)?)
}

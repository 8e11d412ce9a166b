use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::Configuration;
use crate::plan::{build_generator, Strategy};
use crate::rank::RankingPolicy;
use crate::runner::{self, CancelToken};
use crate::types::{with_metadata, ComputationOutput, ScenarioResult};
use crate::ForecastResult;

/// Top-level input for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub config: Configuration,
    pub strategy: Strategy,
    #[serde(default = "default_ranking")]
    pub ranking: RankingPolicy,
}

fn default_ranking() -> RankingPolicy {
    RankingPolicy::ByProfit
}

/// Output of a simulation run: the two ranked retention sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub qualified: Vec<ScenarioResult>,
    pub near_qualified: Vec<ScenarioResult>,
    pub candidates_evaluated: u64,
    pub cancelled: bool,
}

/// Run a full simulation: validate, generate candidates with the
/// selected strategy, evaluate in bounded batches, and return the
/// capped top-K result sets.
pub fn simulate(input: &SimulationInput) -> ForecastResult<ComputationOutput<SimulationOutput>> {
    simulate_with(input, &mut |_, _| {}, &CancelToken::new())
}

/// [`simulate`] with a progress callback invoked at every batch
/// boundary as `(candidates evaluated, total cardinality)` and a
/// cooperative cancellation token. On cancellation the results
/// accumulated so far are still returned, with a warning in the
/// envelope.
pub fn simulate_with(
    input: &SimulationInput,
    progress: &mut dyn FnMut(u64, u128),
    cancel: &CancelToken,
) -> ForecastResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.config.validate()?;

    let mut generator = build_generator(&input.config, input.strategy)?;
    let total = generator.cardinality();
    let outcome = runner::run(
        &input.config,
        generator.as_mut(),
        input.ranking,
        progress,
        cancel,
    )?;

    if outcome.cancelled {
        warnings.push(format!(
            "Run cancelled after {} of {} candidates; returning the sets accumulated so far",
            outcome.candidates_evaluated, total
        ));
    }
    if outcome.qualified_seen > outcome.qualified.len() as u64 {
        warnings.push(format!(
            "{} candidates qualified; retaining the top {} under the ranking policy",
            outcome.qualified_seen,
            outcome.qualified.len()
        ));
    }
    if outcome.near_qualified_seen > outcome.near_qualified.len() as u64 {
        warnings.push(format!(
            "{} candidates nearly qualified; retaining the top {} under the ranking policy",
            outcome.near_qualified_seen,
            outcome.near_qualified.len()
        ));
    }

    let output = SimulationOutput {
        qualified: outcome.qualified,
        near_qualified: outcome.near_qualified,
        candidates_evaluated: outcome.candidates_evaluated,
        cancelled: outcome.cancelled,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(input.strategy),
        &serde_json::json!({
            "months": input.config.months,
            "net_target": input.config.net_target.to_string(),
            "near_target_threshold": input.config.near_target_threshold.map(|t| t.to_string()),
            "strategy": input.strategy,
            "ranking": input.ranking,
            "coaching_policy": input.config.coaching_policy,
            "candidate_space": total.to_string(),
            "sample_budget": input.config.sample_budget,
            "batch_size": input.config.batch_size,
            "result_cap": input.config.result_cap,
            "seed": input.config.seed,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn methodology(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Greedy => "Greedy Best-Effort Revenue Forecast",
        Strategy::Exhaustive => "Exhaustive Revenue Plan Enumeration",
        Strategy::StochasticBatched => "Stochastic Batched Revenue Plan Search",
    }
}

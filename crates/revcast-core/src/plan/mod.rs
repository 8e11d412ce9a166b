pub mod exhaustive;
pub mod greedy;
pub mod stochastic;

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::types::{CoachingPlan, Money, MonthlyPlan, Rate};
use crate::ForecastResult;

pub use exhaustive::{ExhaustiveGenerator, MAX_EXHAUSTIVE_CANDIDATES};
pub use greedy::GreedyGenerator;
pub use stochastic::StochasticGenerator;

/// Which plan generation strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Greedy,
    Exhaustive,
    StochasticBatched,
}

/// One candidate monthly plan. `coaching` is `None` under the
/// `JustClear` policy, where the evaluator derives the count.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub plan: MonthlyPlan,
    pub coaching: Option<CoachingPlan>,
}

/// Lazy, finite candidate source. Restartable only by rebuilding it
/// from the same configuration (and seed).
pub trait CandidateGenerator {
    /// Total number of candidates this generator will yield.
    fn cardinality(&self) -> u128;

    /// Produce up to `limit` candidates; an empty batch means exhausted.
    fn next_batch(&mut self, limit: usize) -> Vec<Candidate>;
}

/// Build the generator selected by `strategy`. The exhaustive variant
/// refuses candidate spaces above [`MAX_EXHAUSTIVE_CANDIDATES`] unless
/// the configuration opts in.
pub fn build_generator(
    config: &Configuration,
    strategy: Strategy,
) -> ForecastResult<Box<dyn CandidateGenerator>> {
    Ok(match strategy {
        Strategy::Greedy => Box::new(GreedyGenerator::new(config)),
        Strategy::Exhaustive => Box::new(ExhaustiveGenerator::new(config)?),
        Strategy::StochasticBatched => Box::new(StochasticGenerator::new(config)),
    })
}

/// Candidate count a strategy would produce for this configuration,
/// saturating at `u128::MAX`. Exposed so callers can warn or cap before
/// anything is materialized.
pub fn candidate_space(config: &Configuration, strategy: Strategy) -> u128 {
    match strategy {
        Strategy::Greedy => 1,
        Strategy::Exhaustive => exhaustive::candidate_space(config),
        Strategy::StochasticBatched => config.sample_budget as u128,
    }
}

/// The `(value, rate)` cross-product in first-seen order, or the
/// per-value rate menu when one is configured.
pub(crate) fn deal_options(config: &Configuration) -> Vec<(Money, Rate)> {
    match &config.value_rates {
        Some(menu) => menu
            .iter()
            .flat_map(|entry| entry.rates.iter().map(|rate| (entry.value, *rate)))
            .collect(),
        None => config
            .deal_values
            .iter()
            .flat_map(|value| config.commission_rates.iter().map(|rate| (*value, *rate)))
            .collect(),
    }
}
